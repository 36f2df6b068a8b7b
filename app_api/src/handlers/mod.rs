pub mod auth;
pub mod common_handler;
pub mod friend_handler;
pub mod swagger;

use crate::result::configure_extractors;
use actix_web::web;
use biz_service::BizContext;

/// 注册全部路由与共享状态
pub fn configure(cfg: &mut web::ServiceConfig, ctx: &BizContext) {
    cfg.app_data(web::Data::from(ctx.ledger.clone()));
    cfg.app_data(web::Data::from(ctx.auth.clone()));
    configure_extractors(cfg);

    common_handler::configure(cfg);
    swagger::configure(cfg);
    auth::configure(cfg);
    friend_handler::configure(cfg);
}
