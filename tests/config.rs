use std::io::Write;

use quill::config::Config;

#[tokio::test]
async fn loads_http_and_database_sections() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
            [http]
            host = "0.0.0.0"
            port = 9000

            [database]
            host = "db.internal"
            port = 5433
            user = "quill"
            password = "hunter2"
            database = "quill_prod"
        "#
    )
    .unwrap();

    let config = Config::load(Some(file.path().to_path_buf())).await.unwrap();

    assert_eq!(config.http.host, "0.0.0.0");
    assert_eq!(config.http.port, 9000);
    assert_eq!(config.database.host, "db.internal");
    assert_eq!(config.database.port, 5433);
    assert_eq!(config.database.database, "quill_prod");
}

#[tokio::test]
async fn rejects_incomplete_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
            [http]
            host = "0.0.0.0"
            port = 9000
        "#
    )
    .unwrap();

    let result = Config::load(Some(file.path().to_path_buf())).await;
    assert!(result.is_err());
}
