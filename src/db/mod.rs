//! MongoDB 연결 관리
//!
//! 시작 시 한 번 연결하고 `ping` 으로 도달 가능 여부를 확인합니다.
//! 연결 실패는 서버 기동 실패로 이어집니다.

use mongodb::{Client, options::ClientOptions};
use log::info;
use crate::config::DatabaseConfig;
use crate::errors::AppError;

const APP_NAME: &str = "jamlink_auth";

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
        client_options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&config.database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", config.database_name);

        Ok(Self {
            client,
            database_name: config.database_name.clone(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}
