//! 요청 처리 시간 제한
//!
//! 유스케이스 전체를 하나의 마감 시간 안에서 실행합니다. 마감이 지나면
//! 진행 중인 future 는 drop 되고 `AppError::Timeout` 을 반환합니다.

use std::future::Future;
use std::time::Duration;
use actix_web::rt::time::timeout;
use crate::errors::AppError;

pub async fn with_deadline<F, T>(limit: Duration, operation: &str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            log::warn!("{} 작업이 {}ms 안에 끝나지 않았습니다", operation, limit.as_millis());
            Err(AppError::Timeout(operation.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_completes_within_deadline() {
        let result = with_deadline(Duration::from_secs(1), "fast", async { Ok::<_, AppError>(7) }).await;

        assert_eq!(result.unwrap(), 7);
    }

    #[actix_web::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> = with_deadline(Duration::from_secs(1), "failing", async {
            Err(AppError::InvalidCredentials)
        })
        .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[actix_web::test]
    async fn test_slow_operation_times_out() {
        let result: Result<(), _> = with_deadline(Duration::from_millis(10), "slow", async {
            actix_web::rt::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(AppError::Timeout(op)) if op == "slow"));
    }
}
