use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::teams::requests::{LecturerAddMemberRequest, RemoveMemberQuery};
use crate::models::users::entities::UserRole;
use crate::services::teams::TeamService;
use crate::utils::{SafeAssignmentIdI64, SafeTeamIdI64};

// 懒加载的全局 TEAM_SERVICE 实例
static TEAM_SERVICE: Lazy<TeamService> = Lazy::new(TeamService::new_lazy);

// HTTP处理程序
pub async fn list_teams(req: HttpRequest, path: SafeAssignmentIdI64) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.list_teams(&req, path.0).await
}

pub async fn join_team(req: HttpRequest, path: SafeTeamIdI64) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.join_team(&req, path.0).await
}

pub async fn leave_team(req: HttpRequest, path: SafeTeamIdI64) -> ActixResult<HttpResponse> {
    TEAM_SERVICE.leave_team(&req, path.0).await
}

pub async fn add_member(
    req: HttpRequest,
    path: SafeTeamIdI64,
    add_data: web::Json<LecturerAddMemberRequest>,
) -> ActixResult<HttpResponse> {
    TEAM_SERVICE
        .add_member(&req, path.0, add_data.into_inner())
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    path: SafeTeamIdI64,
    query: web::Query<RemoveMemberQuery>,
) -> ActixResult<HttpResponse> {
    TEAM_SERVICE
        .remove_member(&req, path.0, query.into_inner())
        .await
}

// 配置路由
pub fn configure_teams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/teams")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_teams))),
    )
    .service(
        web::scope("/api/v1/teams/{team_id}")
            .wrap(middlewares::RequireJWT)
            // 学生自助加入/退出
            .service(web::resource("/join").route(web::post().to(join_team)))
            .service(web::resource("/leave").route(web::post().to(leave_team)))
            // 讲师调整成员归属
            .service(
                web::resource("/members")
                    .route(
                        web::post()
                            .to(add_member)
                            .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles())),
                    )
                    .route(
                        web::delete()
                            .to(remove_member)
                            .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles())),
                    ),
            ),
    );
}
