//! Development seed data.
//!
//! Inserts a small set of users and posts. Users are keyed on email with
//! `ON CONFLICT DO NOTHING`, so re-running the seeder is harmless.

use sqlx::PgPool;

// Placeholder bcrypt hash; real deployments provision users through
// registration, not seeds.
const PLACEHOLDER_HASH: &str = "$2b$10$rBV2kHYW4YW8Y4QZQZQZQO1Y2Y2Y2Y2Y2Y2Y2Y2Y2Y2Y2Y2Y2Y";

const USERS: &[(&str, &str)] = &[
    ("admin@example.com", "admin"),
    ("john.doe@example.com", "johndoe"),
    ("jane.smith@example.com", "janesmith"),
    ("bob.wilson@example.com", "bobwilson"),
    ("alice.johnson@example.com", "alicejohnson"),
];

// (author index into USERS, title, content, status)
const POSTS: &[(usize, &str, &str, &str)] = &[
    (
        0,
        "Welcome to Wander",
        "This is the first post on Wander. Welcome to our platform!",
        "published",
    ),
    (
        1,
        "Getting Started with Node.js",
        "Node.js is a powerful platform for building scalable applications. Here are some tips to get started...",
        "published",
    ),
    (
        1,
        "Understanding TypeScript",
        "TypeScript adds static typing to JavaScript, making your code more robust and maintainable.",
        "published",
    ),
    (
        2,
        "Docker for Developers",
        "Docker containers make it easy to package and deploy applications consistently across environments.",
        "published",
    ),
    (
        2,
        "Draft: Database Design Patterns",
        "This post is still being written. Coming soon!",
        "draft",
    ),
    (
        3,
        "Building RESTful APIs",
        "RESTful APIs follow a set of architectural principles that make them scalable and maintainable.",
        "published",
    ),
    (
        4,
        "React Best Practices",
        "Learn the best practices for building React applications that scale.",
        "published",
    ),
    (
        4,
        "Draft: Kubernetes Basics",
        "An introduction to container orchestration with Kubernetes.",
        "draft",
    ),
];

/// Run all seeds in order.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    seed_users(pool).await?;
    seed_posts(pool).await?;
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("seeding users");

    for (email, username) in USERS {
        sqlx::query(
            "INSERT INTO users (email, username, password_hash) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(*email)
        .bind(*username)
        .bind(PLACEHOLDER_HASH)
        .execute(pool)
        .await?;
    }

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    tracing::info!(seeded = USERS.len(), total, "users seeded");
    Ok(())
}

async fn seed_posts(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("seeding posts");

    let user_ids: Vec<(i32,)> = sqlx::query_as("SELECT id FROM users ORDER BY id LIMIT 5")
        .fetch_all(pool)
        .await?;

    if user_ids.is_empty() {
        tracing::warn!("no users found, skipping posts seeding");
        return Ok(());
    }

    for (author, title, content, status) in POSTS {
        let (user_id,) = user_ids[author % user_ids.len()];
        sqlx::query(
            "INSERT INTO posts (user_id, title, content, status) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(*title)
        .bind(*content)
        .bind(*status)
        .execute(pool)
        .await?;
    }

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await?;
    let (published,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM posts WHERE status = 'published'")
            .fetch_one(pool)
            .await?;
    tracing::info!(seeded = POSTS.len(), total, published, "posts seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_posts_only_reference_seed_users() {
        for (author, ..) in POSTS {
            assert!(*author < USERS.len());
        }
    }

    #[test]
    fn seed_statuses_are_within_the_check_constraint() {
        for (_, _, _, status) in POSTS {
            assert!(matches!(*status, "draft" | "published" | "archived"));
        }
    }
}
