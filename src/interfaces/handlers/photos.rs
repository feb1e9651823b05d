use std::collections::HashMap;

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    entities::photo::{FeedFilter, FeedPage, FeedSort, UpdatePhotoRequest},
    errors::AppError,
    use_cases::extractors::{AuthClaims, MaybeClaims},
    AppState,
};

#[derive(MultipartForm)]
pub struct PhotoUploadForm {
    pub caption: Option<Text<String>>,
    pub image: TempFile,
}

pub fn parse_page(query: &HashMap<String, String>) -> FeedPage {
    let limit = query.get("limit")
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);
    let offset = query.get("offset")
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v >= 0)
        .unwrap_or(0);

    FeedPage { limit, offset }
}

fn parse_sort(query: &HashMap<String, String>) -> Result<FeedSort, AppError> {
    FeedSort::from_param(query.get("sort_by").map(String::as_str))
        .ok_or_else(|| AppError::field("sort_by", "Must be one of: recent, oldest, popular"))
}

fn parse_owner_filter(query: &HashMap<String, String>) -> Result<FeedFilter, AppError> {
    let owner_user_id = match query.get("user_id") {
        Some(raw) => Some(
            Uuid::parse_str(raw)
                .map_err(|_| AppError::field("user_id", "Must be a valid user id"))?,
        ),
        None => None,
    };

    Ok(FeedFilter { owner_user_id })
}

#[instrument(skip(identity, state, query))]
pub async fn list_photos(
    identity: MaybeClaims,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let filter = parse_owner_filter(&query)?;
    let sort = parse_sort(&query)?;
    let page = parse_page(&query);

    let photos = state.feed_handler
        .get_feed(filter, sort, page, identity.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(photos))
}

#[instrument(skip(identity, state, query))]
pub async fn photo_feed(
    identity: MaybeClaims,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let filter = parse_owner_filter(&query)?;
    let sort = parse_sort(&query)?;
    let page = parse_page(&query);

    let photos = state.feed_handler
        .get_feed(filter, sort, page, identity.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(photos))
}

#[instrument(skip(claims, state, form))]
pub async fn upload_photo(
    claims: AuthClaims,
    state: web::Data<AppState>,
    form: MultipartForm<PhotoUploadForm>,
) -> Result<impl Responder, AppError> {
    let owner_user_id = claims.0.user_id().map_err(|_| AppError::UnauthorizedAccess)?;

    let form = form.into_inner();
    let caption = form.caption.map(|text| text.0);

    let image_bytes = tokio::fs::read(form.image.file.path())
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read upload: {}", e)))?;

    let response = state.photo_handler
        .create_photo(owner_user_id, caption, &image_bytes)
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(identity, photo_id, state))]
pub async fn photo_detail(
    identity: MaybeClaims,
    photo_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let photo = state.feed_handler
        .photo_detail(&photo_id, identity.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(photo))
}

#[instrument(skip(claims, photo_id, state, data))]
pub async fn update_photo(
    claims: AuthClaims,
    photo_id: web::Path<Uuid>,
    state: web::Data<AppState>,
    data: web::Json<UpdatePhotoRequest>,
) -> Result<impl Responder, AppError> {
    let requester = claims.0.user_id().map_err(|_| AppError::UnauthorizedAccess)?;

    let photo = state.photo_handler
        .update_photo(requester, &photo_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(photo))
}

#[instrument(skip(claims, photo_id, state))]
pub async fn delete_photo(
    claims: AuthClaims,
    photo_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let requester = claims.0.user_id().map_err(|_| AppError::UnauthorizedAccess)?;

    state.photo_handler.delete_photo(requester, &photo_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(claims, state, query))]
pub async fn saved_photos(
    claims: AuthClaims,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.0.user_id().map_err(|_| AppError::UnauthorizedAccess)?;
    let page = parse_page(&query);

    let photos = state.feed_handler.saved_photos(user_id, page).await?;

    Ok(HttpResponse::Ok().json(photos))
}
