use gemstone_core::prefs::PrefsRepository;
use gemstone_core::session::ValuationSession;
use gemstone_core::{GemCategory, PurityGrade, QualityGrade, ValuationError};
use providers::{LabelProvider, ProviderError, ProviderRegistry, RawLabel};
use std::sync::Arc;
use storage::{MemoryKvStore, SqliteKvStore};
use tokio::sync::Notify;

fn png(tag: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(tag);
    bytes
}

/// Holds images tagged `slow` until released; answers everything else at once.
struct GatedProvider {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait::async_trait]
impl LabelProvider for GatedProvider {
    async fn label(&self, image: &[u8]) -> Result<Vec<RawLabel>, ProviderError> {
        if image.ends_with(b"slow") {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(vec![RawLabel::new("Ruby", 0.9)])
        } else {
            Ok(vec![RawLabel::new("Sapphire", 0.8)])
        }
    }
}

#[tokio::test]
async fn newer_classification_supersedes_pending_one() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let registry = ProviderRegistry::new()
        .with_labeler(
            "gated",
            Arc::new(GatedProvider {
                entered: entered.clone(),
                release: release.clone(),
            }),
        )
        .set_preferred_labeler("gated");
    let session = Arc::new(ValuationSession::new(
        registry,
        PrefsRepository::new(Arc::new(MemoryKvStore::new())),
    ));

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.classify(&png(b"slow")).await })
    };
    entered.notified().await;

    let second = session.classify(&png(b"fast")).await.unwrap();
    assert_eq!(second.category, GemCategory::Sapphire);

    release.notify_one();
    let stale = first.await.unwrap();
    assert!(matches!(stale, Err(ValuationError::Superseded)));

    assert_eq!(session.category().await, GemCategory::Sapphire);
    assert_eq!(
        session.analysis().await.unwrap().predictions.as_slice()[0].text,
        "Sapphire"
    );
}

#[tokio::test]
async fn rejected_non_image_leaves_pending_classification_alone() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let registry = ProviderRegistry::new()
        .with_labeler(
            "gated",
            Arc::new(GatedProvider {
                entered: entered.clone(),
                release: release.clone(),
            }),
        )
        .set_preferred_labeler("gated");
    let session = Arc::new(ValuationSession::new(
        registry,
        PrefsRepository::new(Arc::new(MemoryKvStore::new())),
    ));

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.classify(&png(b"slow")).await })
    };
    entered.notified().await;

    let rejected = session.classify(b"not an image").await;
    assert!(matches!(rejected, Err(ValuationError::Validation(_))));

    release.notify_one();
    let analysis = pending.await.unwrap().unwrap();
    assert_eq!(analysis.category, GemCategory::Ruby);
    assert_eq!(session.category().await, GemCategory::Ruby);
}

#[tokio::test]
async fn estimates_persist_across_sqlite_reopen() {
    let temp = tempfile::tempdir().unwrap();
    let db = temp.path().join("gemstone.db");
    let db = db.to_string_lossy().into_owned();

    {
        let store = Arc::new(SqliteKvStore::open(&db).await.unwrap());
        let session = ValuationSession::new(ProviderRegistry::new(), PrefsRepository::new(store));
        session.prefs().save_settings("SAR", "0.2666").await.unwrap();
        session.select_category(GemCategory::Emerald).await;
        session
            .estimate_at("1.5", QualityGrade::A, PurityGrade::IF, 100)
            .await
            .unwrap();
        session.select_category(GemCategory::Opal).await;
        session
            .estimate_at("0.5", QualityGrade::C, PurityGrade::I1, 200)
            .await
            .unwrap();
    }

    let store = Arc::new(SqliteKvStore::open(&db).await.unwrap());
    let prefs = PrefsRepository::new(store);
    assert_eq!(prefs.currency().await.unwrap(), "SAR");
    let history = prefs.history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].category_label, "Opal");
    assert_eq!(history[1].category_label, "Emerald");
    assert_eq!(history[1].currency, "SAR");
    assert!(history.iter().all(|e| e.weight_carat > 0.0));
}
