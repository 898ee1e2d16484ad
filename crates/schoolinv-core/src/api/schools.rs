//! `/schools` and `/classrooms`.

use super::{ApiClient, ApiError, Query};
use crate::models::{
    Classroom, CreateClassroom, CreateSchool, Id, Page, PageRequest, School, UpdateClassroom,
    UpdateSchool,
};

impl ApiClient {
    pub async fn list_schools(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<School>, ApiError> {
        let mut query: Query = page.query_pairs().into();
        if let Some(s) = search.filter(|s| !s.trim().is_empty()) {
            query.push(("search", s.trim().to_string()));
        }
        self.get("schools", &query).await
    }

    pub async fn get_school(&self, id: Id) -> Result<School, ApiError> {
        self.get(&format!("schools/{}", id), &[]).await
    }

    pub async fn create_school(&self, body: &CreateSchool) -> Result<School, ApiError> {
        self.post("schools", body).await
    }

    pub async fn update_school(&self, id: Id, body: &UpdateSchool) -> Result<School, ApiError> {
        self.put(&format!("schools/{}", id), body).await
    }

    pub async fn delete_school(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("schools/{}", id)).await
    }

    pub async fn list_classrooms(
        &self,
        school_id: Option<Id>,
        page: PageRequest,
    ) -> Result<Page<Classroom>, ApiError> {
        let mut query: Query = page.query_pairs().into();
        if let Some(id) = school_id {
            query.push(("school_id", id.to_string()));
        }
        self.get("classrooms", &query).await
    }

    pub async fn get_classroom(&self, id: Id) -> Result<Classroom, ApiError> {
        self.get(&format!("classrooms/{}", id), &[]).await
    }

    pub async fn create_classroom(&self, body: &CreateClassroom) -> Result<Classroom, ApiError> {
        self.post("classrooms", body).await
    }

    pub async fn update_classroom(
        &self,
        id: Id,
        body: &UpdateClassroom,
    ) -> Result<Classroom, ApiError> {
        self.put(&format!("classrooms/{}", id), body).await
    }

    pub async fn delete_classroom(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("classrooms/{}", id)).await
    }
}
