use std::time::Duration;

use pretty_assertions::assert_eq;

use crate::testcase::backend_test_case;

#[tokio::test]
async fn set_if_not_exists() {
    backend_test_case("set_if_not_exists", |backend, prefix| async move {
        let key = format!("{prefix}:key");

        assert!(backend.set_if_not_exists(&key, "a", None).await?);
        assert!(!backend.set_if_not_exists(&key, "b", None).await?);
        assert_eq!(backend.get(&key).await?, Some("a".into()));

        assert!(backend.delete(&key).await?);
        assert!(!backend.delete(&key).await?);
        assert_eq!(backend.get(&key).await?, None);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn compare_and_delete() {
    backend_test_case("compare_and_delete", |backend, prefix| async move {
        let key = format!("{prefix}:key");

        assert!(!backend.compare_and_delete(&key, "a").await?);

        backend.set_if_not_exists(&key, "a", None).await?;
        assert!(!backend.compare_and_delete(&key, "b").await?);
        assert_eq!(backend.get(&key).await?, Some("a".into()));

        assert!(backend.compare_and_delete(&key, "a").await?);
        assert_eq!(backend.get(&key).await?, None);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn ttl_expiry() {
    backend_test_case("ttl_expiry", |backend, prefix| async move {
        let key = format!("{prefix}:key");

        assert!(
            backend
                .set_if_not_exists(&key, "a", Some(Duration::from_millis(200)))
                .await?
        );
        assert!(
            !backend
                .set_if_not_exists(&key, "b", Some(Duration::from_millis(200)))
                .await?
        );

        backend
            .sleep_for_duration(Duration::from_millis(400))
            .await?;

        assert_eq!(backend.get(&key).await?, None);
        assert!(backend.set_if_not_exists(&key, "b", None).await?);
        backend.delete(&key).await?;

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn health_check() {
    backend_test_case("health_check", |backend, _| async move {
        backend.health_check().await?;
        Ok(())
    })
    .await;
}
