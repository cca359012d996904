use trivia_api::db::queries::{categories, questions};
use trivia_api::db::{in_memory, run_migrations, Category, NewQuestion};
use trivia_api::transfer::{export_data, import_data, CATEGORIES_FILE, QUESTIONS_FILE};

async fn fresh_pool() -> sqlx::SqlitePool {
    let pool = in_memory().await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

#[tokio::test]
async fn exported_tables_import_into_fresh_database() {
    let source = fresh_pool().await;
    let science = categories::create_category(&source, "Science").await.unwrap();
    let art = categories::create_category(&source, "Art").await.unwrap();
    for (text, category) in [("Hydrogen?", science), ("Escher?", art), ("Alkali?", science)] {
        questions::create_question(
            &source,
            &NewQuestion {
                question: Some(text.to_owned()),
                answer: Some("yes, with a comma".to_owned()),
                category: Some(category),
                difficulty: Some(4),
            },
        )
        .await
        .unwrap();
    }
    // ids survive gaps left by deletions
    questions::delete_question(&source, 2).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    export_data(&source, dir.path()).await.unwrap();
    assert!(dir.path().join(CATEGORIES_FILE).exists());
    assert!(dir.path().join(QUESTIONS_FILE).exists());

    let target = fresh_pool().await;
    import_data(&target, dir.path()).await.unwrap();

    assert_eq!(
        categories::get_all_categories(&target).await.unwrap(),
        vec![
            Category { id: science, kind: "Science".to_owned() },
            Category { id: art, kind: "Art".to_owned() },
        ]
    );
    assert_eq!(
        questions::get_all_questions(&target).await.unwrap(),
        questions::get_all_questions(&source).await.unwrap()
    );
}

#[tokio::test]
async fn import_replaces_rows_with_same_id() {
    let pool = fresh_pool().await;
    categories::create_category(&pool, "Sience").await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CATEGORIES_FILE), "id,type\n1,Science\n2,Art\n").unwrap();
    std::fs::write(
        dir.path().join(QUESTIONS_FILE),
        "id,question,answer,category,difficulty\n7,Hydrogen?,H,1,1\n",
    )
    .unwrap();
    import_data(&pool, dir.path()).await.unwrap();

    let all = categories::get_all_categories(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].kind, "Science");
    let imported = questions::get_question(&pool, 7).await.unwrap().unwrap();
    assert_eq!(imported.answer, "H");
}

#[tokio::test]
async fn missing_files_fail_import() {
    let pool = fresh_pool().await;
    let dir = tempfile::tempdir().unwrap();
    assert!(import_data(&pool, dir.path()).await.is_err());
}
