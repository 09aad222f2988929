mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "campus")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("campus.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Course operations
    // ============================================================

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, teaser, description, \"order\", created_at, updated_at
             FROM courses ORDER BY \"order\", title",
        )?;

        let courses = stmt
            .query_map([], map_course)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(courses)
    }

    pub fn get_course_by_slug(&self, slug: &str) -> Result<Option<Course>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, teaser, description, \"order\", created_at, updated_at
             FROM courses WHERE slug = ?",
        )?;

        let mut rows = stmt.query([slug])?;
        match rows.next()? {
            Some(row) => Ok(Some(map_course(row)?)),
            None => Ok(None),
        }
    }

    pub fn create_course(&self, input: CreateCourseInput) -> Result<Course> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();
        let slug = unique_slug(&conn, "courses", &slugify(&input.title))?;
        let order = input.order.unwrap_or(99);

        conn.execute(
            "INSERT INTO courses (id, title, slug, teaser, description, \"order\", created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.title,
                &slug,
                &input.teaser,
                &input.description,
                order,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Course {
            id,
            title: input.title,
            slug,
            teaser: input.teaser,
            description: input.description,
            order,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_course(&self, id: Uuid, input: UpdateCourseInput) -> Result<Option<Course>> {
        let Some(existing) = self.get_course(id)? else {
            return Ok(None);
        };

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let title = input.title.unwrap_or(existing.title);
        let teaser = input.teaser.or(existing.teaser);
        let description = input.description.or(existing.description);
        let order = input.order.unwrap_or(existing.order);

        conn.execute(
            "UPDATE courses SET title = ?, teaser = ?, description = ?, \"order\" = ?, updated_at = ? WHERE id = ?",
            (
                &title,
                &teaser,
                &description,
                order,
                now.to_rfc3339(),
                id.to_string(),
            ),
        )?;

        Ok(Some(Course {
            id,
            title,
            slug: existing.slug,
            teaser,
            description,
            order,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    pub fn get_course(&self, id: Uuid) -> Result<Option<Course>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, teaser, description, \"order\", created_at, updated_at
             FROM courses WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(map_course(row)?)),
            None => Ok(None),
        }
    }

    pub fn delete_course(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM courses WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Location operations
    // ============================================================

    pub fn get_all_locations(&self) -> Result<Vec<Location>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, address, city, created_at FROM locations ORDER BY name",
        )?;

        let locations = stmt
            .query_map([], |row| {
                Ok(Location {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                    address: row.get(2)?,
                    city: row.get(3)?,
                    created_at: parse_datetime(row.get::<_, String>(4)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(locations)
    }

    pub fn create_location(&self, input: CreateLocationInput) -> Result<Location> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO locations (id, name, address, city, created_at) VALUES (?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.name,
                &input.address,
                &input.city,
                now.to_rfc3339(),
            ),
        )?;

        Ok(Location {
            id,
            name: input.name,
            address: input.address,
            city: input.city,
            created_at: now,
        })
    }

    pub fn update_location(&self, id: Uuid, input: UpdateLocationInput) -> Result<Option<Location>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, address, city, created_at FROM locations WHERE id = ?",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let existing = Location {
            id: parse_uuid(row.get::<_, String>(0)?),
            name: row.get(1)?,
            address: row.get(2)?,
            city: row.get(3)?,
            created_at: parse_datetime(row.get::<_, String>(4)?),
        };
        drop(rows);
        drop(stmt);

        let name = input.name.unwrap_or(existing.name);
        let address = input.address.or(existing.address);
        let city = input.city.or(existing.city);

        conn.execute(
            "UPDATE locations SET name = ?, address = ?, city = ? WHERE id = ?",
            (&name, &address, &city, id.to_string()),
        )?;

        Ok(Some(Location {
            id,
            name,
            address,
            city,
            created_at: existing.created_at,
        }))
    }

    pub fn delete_location(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM locations WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Category operations
    // ============================================================

    pub fn get_all_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY name")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    pub fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare("SELECT id, name FROM categories WHERE name = ?")?;

        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Category {
                id: parse_uuid(row.get::<_, String>(0)?),
                name: row.get(1)?,
            }))
        } else {
            Ok(None)
        }
    }

    pub fn create_category(&self, input: CreateCategoryInput) -> Result<Category> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();

        conn.execute(
            "INSERT INTO categories (id, name) VALUES (?, ?)",
            (id.to_string(), &input.name),
        )?;

        Ok(Category {
            id,
            name: input.name,
        })
    }

    pub fn delete_category(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "DELETE FROM page_categories WHERE category_id = ?",
            [id.to_string()],
        )?;
        let rows = conn.execute("DELETE FROM categories WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Page operations
    // ============================================================

    pub fn get_all_pages(&self) -> Result<Vec<Page>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, content, created_at, updated_at FROM pages ORDER BY title",
        )?;

        let pages = stmt
            .query_map([], map_page)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }

    pub fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, content, created_at, updated_at FROM pages WHERE slug = ?",
        )?;

        let mut rows = stmt.query([slug])?;
        match rows.next()? {
            Some(row) => Ok(Some(map_page(row)?)),
            None => Ok(None),
        }
    }

    pub fn get_page(&self, id: Uuid) -> Result<Option<Page>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, content, created_at, updated_at FROM pages WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(map_page(row)?)),
            None => Ok(None),
        }
    }

    /// Pages that are members of the given category, ordered by title.
    pub fn get_pages_in_category(&self, category_id: Uuid) -> Result<Vec<Page>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT p.id, p.title, p.slug, p.content, p.created_at, p.updated_at
             FROM pages p
             JOIN page_categories pc ON pc.page_id = p.id
             WHERE pc.category_id = ?
             ORDER BY p.title",
        )?;

        let pages = stmt
            .query_map([category_id.to_string()], map_page)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages)
    }

    pub fn get_page_categories(&self, page_id: Uuid) -> Result<Vec<Category>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT c.id, c.name FROM categories c
             JOIN page_categories pc ON pc.category_id = c.id
             WHERE pc.page_id = ?
             ORDER BY c.name",
        )?;

        let categories = stmt
            .query_map([page_id.to_string()], |row| {
                Ok(Category {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    pub fn create_page(&self, input: CreatePageInput) -> Result<Page> {
        let conn = self.conn.lock().expect("database lock poisoned");

        for category_id in &input.category_ids {
            let count: i32 = conn.query_row(
                "SELECT COUNT(*) FROM categories WHERE id = ?",
                [category_id.to_string()],
                |row| row.get(0),
            )?;
            if count == 0 {
                anyhow::bail!("Category not found: {}", category_id);
            }
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        let slug = unique_slug(&conn, "pages", &slugify(&input.title))?;

        conn.execute(
            "INSERT INTO pages (id, title, slug, content, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.title,
                &slug,
                &input.content,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        for category_id in &input.category_ids {
            conn.execute(
                "INSERT INTO page_categories (page_id, category_id) VALUES (?, ?)",
                (id.to_string(), category_id.to_string()),
            )?;
        }

        Ok(Page {
            id,
            title: input.title,
            slug,
            content: input.content,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_page(&self, id: Uuid, input: UpdatePageInput) -> Result<Option<Page>> {
        let Some(existing) = self.get_page(id)? else {
            return Ok(None);
        };

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let title = input.title.unwrap_or(existing.title);
        let content = input.content.or(existing.content);

        conn.execute(
            "UPDATE pages SET title = ?, content = ?, updated_at = ? WHERE id = ?",
            (&title, &content, now.to_rfc3339(), id.to_string()),
        )?;

        if let Some(category_ids) = input.category_ids {
            conn.execute(
                "DELETE FROM page_categories WHERE page_id = ?",
                [id.to_string()],
            )?;
            for category_id in category_ids {
                conn.execute(
                    "INSERT INTO page_categories (page_id, category_id) VALUES (?, ?)",
                    (id.to_string(), category_id.to_string()),
                )?;
            }
        }

        Ok(Some(Page {
            id,
            title,
            slug: existing.slug,
            content,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    pub fn delete_page(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "DELETE FROM page_categories WHERE page_id = ?",
            [id.to_string()],
        )?;
        let rows = conn.execute("DELETE FROM pages WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Job operations
    // ============================================================

    pub fn get_all_jobs(&self) -> Result<Vec<Job>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, description, active, created_at, updated_at
             FROM jobs ORDER BY created_at DESC",
        )?;

        let jobs = stmt.query_map([], map_job)?.collect::<Result<Vec<_>, _>>()?;

        Ok(jobs)
    }

    pub fn get_active_jobs(&self) -> Result<Vec<Job>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, description, active, created_at, updated_at
             FROM jobs WHERE active = 1 ORDER BY created_at DESC",
        )?;

        let jobs = stmt.query_map([], map_job)?.collect::<Result<Vec<_>, _>>()?;

        Ok(jobs)
    }

    pub fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, slug, description, active, created_at, updated_at
             FROM jobs WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(map_job(row)?)),
            None => Ok(None),
        }
    }

    pub fn create_job(&self, input: CreateJobInput) -> Result<Job> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();
        let slug = unique_slug(&conn, "jobs", &slugify(&input.title))?;
        let active = input.active.unwrap_or(true);

        conn.execute(
            "INSERT INTO jobs (id, title, slug, description, active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.title,
                &slug,
                &input.description,
                active as i32,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Job {
            id,
            title: input.title,
            slug,
            description: input.description,
            active,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_job(&self, id: Uuid, input: UpdateJobInput) -> Result<Option<Job>> {
        let Some(existing) = self.get_job(id)? else {
            return Ok(None);
        };

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let title = input.title.unwrap_or(existing.title);
        let description = input.description.or(existing.description);
        let active = input.active.unwrap_or(existing.active);

        conn.execute(
            "UPDATE jobs SET title = ?, description = ?, active = ?, updated_at = ? WHERE id = ?",
            (
                &title,
                &description,
                active as i32,
                now.to_rfc3339(),
                id.to_string(),
            ),
        )?;

        Ok(Some(Job {
            id,
            title,
            slug: existing.slug,
            description,
            active,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    pub fn delete_job(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM jobs WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Contact operations
    // ============================================================

    pub fn create_contact(&self, input: CreateContactInput) -> Result<Contact> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();
        let utm_json = input
            .utm_params
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        conn.execute(
            "INSERT INTO contacts (id, name, email, message, course, jobcenter, track, utm_params, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.name,
                &input.email,
                &input.message,
                &input.course,
                input.jobcenter as i32,
                &input.track,
                &utm_json,
                now.to_rfc3339(),
            ),
        )?;

        Ok(Contact {
            id,
            name: input.name,
            email: input.email,
            message: input.message,
            course: input.course,
            jobcenter: input.jobcenter,
            track: input.track,
            utm_params: input.utm_params,
            created_at: now,
        })
    }

    pub fn get_all_contacts(&self) -> Result<Vec<Contact>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, email, message, course, jobcenter, track, utm_params, created_at
             FROM contacts ORDER BY created_at DESC",
        )?;

        let contacts = stmt
            .query_map([], |row| {
                let utm_json: Option<String> = row.get(7)?;
                Ok(Contact {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                    email: row.get(2)?,
                    message: row.get(3)?,
                    course: row.get(4)?,
                    jobcenter: row.get::<_, i32>(5)? != 0,
                    track: row.get(6)?,
                    utm_params: utm_json.and_then(|s| serde_json::from_str(&s).ok()),
                    created_at: parse_datetime(row.get::<_, String>(8)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(contacts)
    }

    // ============================================================
    // Newsletter operations
    // ============================================================

    /// Store a newsletter subscriber. Returns false if the email is already
    /// on the list.
    pub fn add_subscriber(&self, email: &str) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        let rows = conn.execute(
            "INSERT OR IGNORE INTO newsletter_subscribers (id, email, created_at) VALUES (?, ?, ?)",
            (id.to_string(), email, now.to_rfc3339()),
        )?;

        Ok(rows > 0)
    }

    // ============================================================
    // Question diagram operations
    // ============================================================

    /// Store a new question diagram. The newest stored diagram is the one
    /// served to visitors; older versions are kept for reference.
    pub fn save_question_diagram(&self, payload: &serde_json::Value) -> Result<Uuid> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO question_diagrams (id, payload, created_at) VALUES (?, ?, ?)",
            (
                id.to_string(),
                serde_json::to_string(payload)?,
                now.to_rfc3339(),
            ),
        )?;

        Ok(id)
    }

    pub fn get_latest_question_diagram(&self) -> Result<Option<serde_json::Value>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT payload FROM question_diagrams ORDER BY created_at DESC, id LIMIT 1",
        )?;

        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            let raw: String = row.get(0)?;
            Ok(Some(serde_json::from_str(&raw)?))
        } else {
            Ok(None)
        }
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn map_course(row: &rusqlite::Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: parse_uuid(row.get::<_, String>(0)?),
        title: row.get(1)?,
        slug: row.get(2)?,
        teaser: row.get(3)?,
        description: row.get(4)?,
        order: row.get(5)?,
        created_at: parse_datetime(row.get::<_, String>(6)?),
        updated_at: parse_datetime(row.get::<_, String>(7)?),
    })
}

fn map_page(row: &rusqlite::Row<'_>) -> rusqlite::Result<Page> {
    Ok(Page {
        id: parse_uuid(row.get::<_, String>(0)?),
        title: row.get(1)?,
        slug: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_datetime(row.get::<_, String>(4)?),
        updated_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

fn map_job(row: &rusqlite::Row<'_>) -> rusqlite::Result<Job> {
    Ok(Job {
        id: parse_uuid(row.get::<_, String>(0)?),
        title: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        active: row.get::<_, i32>(4)? != 0,
        created_at: parse_datetime(row.get::<_, String>(5)?),
        updated_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Derive a URL slug from a title: lowercase, alphanumerics kept, everything
/// else collapsed to single dashes.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Find a slug not yet present in `table`, appending -2, -3, ... as needed.
fn unique_slug(conn: &Connection, table: &str, base: &str) -> Result<String> {
    let base = if base.is_empty() { "untitled" } else { base };
    let mut slug = base.to_string();
    let mut n = 2;
    loop {
        let count: i32 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE slug = ?", table),
            [&slug],
            |row| row.get(0),
        )?;
        if count == 0 {
            return Ok(slug);
        }
        slug = format!("{}-{}", base, n);
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Web Development"), "web-development");
        assert_eq!(slugify("  UX / UI Design!  "), "ux-ui-design");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
    }

    #[test]
    fn unique_slug_appends_counter() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();

        let first = db
            .create_course(CreateCourseInput {
                title: "Web Development".to_string(),
                teaser: None,
                description: None,
                order: None,
            })
            .unwrap();
        let second = db
            .create_course(CreateCourseInput {
                title: "Web Development".to_string(),
                teaser: None,
                description: None,
                order: None,
            })
            .unwrap();

        assert_eq!(first.slug, "web-development");
        assert_eq!(second.slug, "web-development-2");
    }
}
