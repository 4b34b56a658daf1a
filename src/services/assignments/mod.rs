pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{
    AssignmentQueryParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建大作业
    pub async fn create_assignment(
        &self,
        req: &HttpRequest,
        create_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, req, create_data).await
    }

    // 列出大作业
    pub async fn list_assignments(
        &self,
        req: &HttpRequest,
        query: AssignmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, req, query).await
    }

    // 获取大作业详情（含小组名单）
    pub async fn get_assignment(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, req, assignment_id).await
    }

    // 更新大作业
    pub async fn update_assignment(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
        update_data: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, req, assignment_id, update_data).await
    }

    // 删除大作业
    pub async fn delete_assignment(
        &self,
        req: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, req, assignment_id).await
    }
}
