use std::str::FromStr;

use clap::Parser;
use fake::{
    faker::lorem::en::{Paragraph, Sentence},
    Fake,
};
use notice_board::{
    domain::{CreateNoticeRequest, NoticeTag},
    repository::{NoticeRepository, SqliteNoticeRepository},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Fill a notice board database with sample notices for local development.
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    /// Database to seed; created if it does not exist
    #[arg(long, env = "NOTICE_BOARD__DATABASE__URL", default_value = "sqlite://notices.db")]
    database_url: String,

    /// Number of notices to create
    #[arg(long, default_value_t = 20)]
    count: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let connect_options = SqliteConnectOptions::from_str(&args.database_url)?
        .create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let notice_repo = SqliteNoticeRepository::new(db_pool.clone());

    println!("📢 Creating {} notices...", args.count);
    for i in 0..args.count {
        let tag = NoticeTag::ALL[i % NoticeTag::ALL.len()];
        let link = if i % 3 == 0 {
            Some(format!("https://example.com/notices/{}", i + 1))
        } else {
            None
        };

        let request = CreateNoticeRequest {
            topic: Some(Sentence(3..7).fake()),
            body: Some(Paragraph(2..4).fake()),
            tag: Some(tag.as_str().to_string()),
            link,
        };

        notice_repo.create(request.into_new_notice()?).await?;
    }

    let total = notice_repo.count().await?;
    println!("  ✅ Board now holds {} notices", total);

    db_pool.close().await;
    println!("🎉 Seeding complete!");

    Ok(())
}
