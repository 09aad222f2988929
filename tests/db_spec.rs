use campus_cms::db::Database;
use campus_cms::models::*;
use serde_json::json;
use speculate2::speculate;
use uuid::Uuid;

fn create_test_course(db: &Database, title: &str, order: Option<i64>) -> Course {
    db.create_course(CreateCourseInput {
        title: title.to_string(),
        teaser: None,
        description: None,
        order,
    })
    .expect("Failed to create course")
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "courses" {
        describe "create_course" {
            it "derives a slug and defaults the order to 99" {
                let course = create_test_course(&db, "Web Development", None);

                assert_eq!(course.slug, "web-development");
                assert_eq!(course.order, 99);
            }
        }

        describe "get_all_courses" {
            it "returns courses sorted by order, then title" {
                create_test_course(&db, "Zeta", Some(1));
                create_test_course(&db, "Beta", Some(2));
                create_test_course(&db, "Alpha", Some(2));

                let courses = db.get_all_courses().expect("Query failed");
                let titles: Vec<_> = courses.iter().map(|c| c.title.as_str()).collect();
                assert_eq!(titles, vec!["Zeta", "Alpha", "Beta"]);
            }
        }

        describe "update_course" {
            it "returns None for a non-existent course" {
                let result = db.update_course(Uuid::new_v4(), UpdateCourseInput {
                    title: Some("New".to_string()),
                    teaser: None,
                    description: None,
                    order: None,
                }).expect("Query failed");
                assert!(result.is_none());
            }

            it "keeps the slug stable across renames" {
                let course = create_test_course(&db, "Data Science", None);

                let updated = db.update_course(course.id, UpdateCourseInput {
                    title: Some("Data Analytics".to_string()),
                    teaser: None,
                    description: None,
                    order: None,
                }).expect("Update failed").expect("Course missing");

                assert_eq!(updated.title, "Data Analytics");
                assert_eq!(updated.slug, "data-science");
            }
        }
    }

    describe "pages and categories" {
        describe "get_pages_in_category" {
            it "returns only member pages, ordered by title" {
                let header = db.create_category(CreateCategoryInput {
                    name: "header".to_string(),
                }).expect("Failed to create category");

                db.create_page(CreatePageInput {
                    title: "Zebra".to_string(),
                    content: None,
                    category_ids: vec![header.id],
                }).expect("Failed to create page");

                db.create_page(CreatePageInput {
                    title: "About".to_string(),
                    content: None,
                    category_ids: vec![header.id],
                }).expect("Failed to create page");

                db.create_page(CreatePageInput {
                    title: "Unlisted".to_string(),
                    content: None,
                    category_ids: vec![],
                }).expect("Failed to create page");

                let pages = db.get_pages_in_category(header.id).expect("Query failed");
                let titles: Vec<_> = pages.iter().map(|p| p.title.as_str()).collect();
                assert_eq!(titles, vec!["About", "Zebra"]);
            }
        }

        describe "create_page" {
            it "rejects unknown category ids" {
                let result = db.create_page(CreatePageInput {
                    title: "Broken".to_string(),
                    content: None,
                    category_ids: vec![Uuid::new_v4()],
                });
                assert!(result.is_err());
            }
        }

        describe "update_page" {
            it "replaces category memberships wholesale" {
                let header = db.create_category(CreateCategoryInput {
                    name: "header".to_string(),
                }).expect("Failed to create category");
                let footer = db.create_category(CreateCategoryInput {
                    name: "footer".to_string(),
                }).expect("Failed to create category");

                let page = db.create_page(CreatePageInput {
                    title: "Imprint".to_string(),
                    content: None,
                    category_ids: vec![header.id],
                }).expect("Failed to create page");

                db.update_page(page.id, UpdatePageInput {
                    title: None,
                    content: None,
                    category_ids: Some(vec![footer.id]),
                }).expect("Update failed");

                assert!(db.get_pages_in_category(header.id).expect("Query failed").is_empty());
                let in_footer = db.get_pages_in_category(footer.id).expect("Query failed");
                assert_eq!(in_footer.len(), 1);
                assert_eq!(in_footer[0].title, "Imprint");
            }
        }

        describe "get_category_by_name" {
            it "returns None for a missing category" {
                let result = db.get_category_by_name("footer").expect("Query failed");
                assert!(result.is_none());
            }
        }
    }

    describe "jobs" {
        describe "get_active_jobs" {
            it "filters out inactive postings" {
                db.create_job(CreateJobInput {
                    title: "Teacher".to_string(),
                    description: None,
                    active: None,
                }).expect("Failed to create job");

                db.create_job(CreateJobInput {
                    title: "Old Posting".to_string(),
                    description: None,
                    active: Some(false),
                }).expect("Failed to create job");

                let active = db.get_active_jobs().expect("Query failed");
                assert_eq!(active.len(), 1);
                assert_eq!(active[0].title, "Teacher");

                let all = db.get_all_jobs().expect("Query failed");
                assert_eq!(all.len(), 2);
            }
        }
    }

    describe "contacts" {
        describe "create_contact" {
            it "stores the lead with its tracking metadata" {
                db.create_contact(CreateContactInput {
                    name: "Ada".to_string(),
                    email: "ada@example.org".to_string(),
                    message: None,
                    course: Some("web-development".to_string()),
                    jobcenter: true,
                    track: Some("https://example.org/".to_string()),
                    utm_params: Some(json!({ "utm_source": "ads" })),
                }).expect("Failed to create contact");

                let contacts = db.get_all_contacts().expect("Query failed");
                assert_eq!(contacts.len(), 1);
                assert!(contacts[0].jobcenter);
                assert_eq!(contacts[0].utm_params, Some(json!({ "utm_source": "ads" })));
            }
        }
    }

    describe "newsletter" {
        describe "add_subscriber" {
            it "reports duplicates without storing them twice" {
                assert!(db.add_subscriber("ada@example.org").expect("Insert failed"));
                assert!(!db.add_subscriber("ada@example.org").expect("Insert failed"));
            }
        }
    }

    describe "question diagrams" {
        describe "get_latest_question_diagram" {
            it "returns None before any diagram is stored" {
                let result = db.get_latest_question_diagram().expect("Query failed");
                assert!(result.is_none());
            }

            it "serves the most recently stored diagram" {
                db.save_question_diagram(&json!({ "version": 1 })).expect("Save failed");
                db.save_question_diagram(&json!({ "version": 2 })).expect("Save failed");

                let latest = db.get_latest_question_diagram().expect("Query failed");
                assert_eq!(latest, Some(json!({ "version": 2 })));
            }
        }
    }
}
