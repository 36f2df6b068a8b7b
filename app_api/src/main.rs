use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use anyhow::Context;
use app_api::handlers;
use app_api::middleware::AuthMiddleware;
use biz_service::BizContext;
use common::config::AppConfig;
use log::{LevelFilter, warn};
use std::str::FromStr;
use std::time::Duration;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 读取配置文件，默认 api-config.toml
    let config_file = std::env::args().nth(1).unwrap_or_else(|| "api-config.toml".to_string());
    AppConfig::init(&config_file)?;
    let app_cfg = AppConfig::get();
    //初始化日志
    init_log(&app_cfg)?;

    let ctx = BizContext::init(&app_cfg).await?;
    let server = app_cfg.get_server();
    let address_and_port = format!("{}:{}", server.host, server.port);
    warn!("Starting server on {}", address_and_port);
    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(ctx.auth.clone()))
            .wrap(Logger::default())
            // 配置 控制器
            .configure(|cfg| handlers::configure(cfg, &ctx))
    })
    .keep_alive(actix_web::http::KeepAlive::Timeout(Duration::from_secs(600)))
    .bind(&address_and_port)
    .with_context(|| format!("bind {}", address_and_port))?
    .run()
    .await?;
    Ok(())
}

pub fn init_log(config: &AppConfig) -> anyhow::Result<()> {
    let log_level = config.get_sys().log_level;
    let level = LevelFilter::from_str(&log_level).map_err(|e| anyhow::anyhow!("invalid log level {}: {}", log_level, e))?;
    env_logger::Builder::new().filter(None, level).init();
    Ok(())
}
