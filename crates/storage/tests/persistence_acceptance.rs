use storage::{KeyValueStore, Storage};

#[tokio::test]
async fn items_survive_reopening_the_database() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("store.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    {
        let writer = Storage::new(&database_url).await.expect("writer db");
        writer
            .set_item("incident_coords", r#"{"lat":43.65,"lng":-79.38}"#)
            .await
            .expect("write coords");
        writer
            .set_item("recent_news", r#"["road closed"]"#)
            .await
            .expect("write news");
        writer.pool().close().await;
    }

    let reader = Storage::new(&database_url).await.expect("reader db");
    assert_eq!(
        reader
            .get_item("incident_coords")
            .await
            .expect("read coords")
            .as_deref(),
        Some(r#"{"lat":43.65,"lng":-79.38}"#)
    );
    assert_eq!(
        reader.keys().await.expect("keys"),
        vec!["incident_coords", "recent_news"]
    );
}

#[tokio::test]
async fn two_handles_on_one_file_see_each_others_writes() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("shared.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let writer = Storage::new(&database_url).await.expect("writer db");
    let reader = Storage::new(&database_url).await.expect("reader db");

    writer.set_item("recent_news", "[]").await.expect("write");
    assert_eq!(
        reader.get_item("recent_news").await.expect("read").as_deref(),
        Some("[]")
    );
}
