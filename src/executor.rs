use std::future::Future;
use log::{error, warn};
use crate::api::error::ApiError;
use crate::image::Image;

/// A single manifest which couldn't be deleted
#[derive(Debug)]
pub struct DeletionFailure {
    pub image: Image,
    pub reason: ApiError,
}

#[derive(Debug, Default)]
pub struct DeletionReport {
    pub deleted: usize,
    pub failures: Vec<DeletionFailure>,
}

/// Delete all `images` in the given order using `delete_one(repository, digest)` <br>
/// Every attempt is logged before the deletion is requested. A failed deletion is recorded
/// in the report and doesn't stop the remaining deletions
pub async fn delete_all<F, Fut>(images: Vec<Image>, mut delete_one: F) -> DeletionReport
where
    F: FnMut(String, String) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let mut report = DeletionReport::default();

    for image in images {
        warn!(
            "Deleting image {}:{:?}@{}. Image is {} days old.",
            image.repository(),
            image.tags(),
            image.digest(),
            image.age_days()
        );
        match delete_one(image.repository().to_string(), image.digest().to_string()).await {
            Ok(_) => report.deleted += 1,
            Err(reason) => {
                error!("Unable to delete image {}@{}. Reason: {reason}", image.repository(), image.digest());
                report.failures.push(DeletionFailure { image, reason });
            }
        }
    }

    report
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};
    use crate::api::error::ApiError;
    use crate::executor::delete_all;
    use crate::image::Image;
    use crate::test::digest;

    fn get_images(count: u8) -> Vec<Image> {
        (0..count)
            .map(|seed| Image::new(format!("app/service-{seed}"), Some(vec![format!("v{seed}")]), digest(seed), i64::from(seed)))
            .collect()
    }

    #[tokio::test]
    async fn test_deletes_in_order() {
        let calls = Arc::new(Mutex::new(vec![]));
        let recorded = calls.clone();
        let report = delete_all(get_images(3), move |repository, digest| {
            recorded.lock().unwrap().push((repository, digest));
            async { Ok(()) }
        }).await;

        assert_eq!(report.deleted, 3);
        assert!(report.failures.is_empty());
        assert_eq!(*calls.lock().unwrap(), vec![
            (String::from("app/service-0"), digest(0)),
            (String::from("app/service-1"), digest(1)),
            (String::from("app/service-2"), digest(2)),
        ]);
    }

    #[tokio::test]
    async fn test_continues_after_failure() {
        let calls = Arc::new(Mutex::new(0usize));
        let recorded = calls.clone();
        let report = delete_all(get_images(4), move |repository, _| {
            *recorded.lock().unwrap() += 1;
            async move {
                if repository == "app/service-1" || repository == "app/service-2" {
                    Err(ApiError::RegistryError(format!("{repository} is locked")))
                } else {
                    Ok(())
                }
            }
        }).await;

        assert_eq!(*calls.lock().unwrap(), 4);
        assert_eq!(report.deleted, 2);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].image.repository(), "app/service-1");
        assert!(matches!(&report.failures[1].reason, ApiError::RegistryError(reason) if reason == "app/service-2 is locked"));
    }

    #[tokio::test]
    async fn test_nothing_to_delete() {
        let report = delete_all(vec![], |_, _| async { Ok(()) }).await;
        assert_eq!(report.deleted, 0);
        assert!(report.failures.is_empty());
    }
}
