//! Navigation data assembly with a cache-aside loader.
//!
//! Every inbound request needs the site-navigation payload: the ordered
//! course list, the campus locations, and the pages filed under the
//! "header" and "footer" categories. [`load_nav_data`] prefers a cached
//! copy and falls back to reconstructing the payload from the database,
//! writing the result back on a best-effort basis.
//!
//! The cached record is all-or-nothing: it is written wholesale after a
//! full reconstruction and never patched incrementally. There is no expiry
//! and no coalescing of concurrent misses; simultaneous cache-miss requests
//! each rebuild independently and the last write wins, which is benign
//! because reconstruction is idempotent.

use serde::{Deserialize, Serialize};

use crate::cache::NavCache;
use crate::db::Database;
use crate::models::{Course, Location, Page};

/// Cache key under which the navigation payload is stored.
pub const NAV_CACHE_KEY: &str = "navData";

/// The aggregated site-navigation payload.
///
/// Field names serialize in camelCase so the cached blob matches what the
/// templates and any external cache consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavData {
    pub courses: Vec<Course>,
    pub locations: Vec<Location>,
    pub header_pages: Vec<Page>,
    pub footer_pages: Vec<Page>,
}

/// Produce the navigation payload, preferring a cache hit.
///
/// On a usable cached value the database is not touched at all. A cache
/// read failure or a malformed blob degrades to reconstruction; a cache
/// write failure is logged and ignored. Database failures during
/// reconstruction propagate to the caller.
pub async fn load_nav_data(db: &Database, cache: &NavCache) -> anyhow::Result<NavData> {
    match cache.get(NAV_CACHE_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str::<NavData>(&raw) {
            Ok(data) => {
                tracing::debug!("using cached data");
                return Ok(data);
            }
            Err(e) => {
                tracing::warn!("Cached navigation data is malformed, rebuilding: {}", e);
            }
        },
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("Could not get navigation data from cache: {}", e);
        }
    }

    let data = rebuild_nav_data(db)?;

    match serde_json::to_string(&data) {
        Ok(raw) => {
            if let Err(e) = cache.set(NAV_CACHE_KEY, raw).await {
                tracing::warn!("Could not save navigation data to cache: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!("Could not serialize navigation data for cache: {}", e);
        }
    }

    Ok(data)
}

/// Reconstruct the payload from the database. A missing "header" or
/// "footer" category yields an empty page list rather than an error.
fn rebuild_nav_data(db: &Database) -> anyhow::Result<NavData> {
    let courses = db.get_all_courses()?;
    let locations = db.get_all_locations()?;

    let footer_pages = match db.get_category_by_name("footer")? {
        Some(category) => db.get_pages_in_category(category.id)?,
        None => Vec::new(),
    };
    let header_pages = match db.get_category_by_name("header")? {
        Some(category) => db.get_pages_in_category(category.id)?,
        None => Vec::new(),
    };

    Ok(NavData {
        courses,
        locations,
        header_pages,
        footer_pages,
    })
}
