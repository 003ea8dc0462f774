use crate::models::{ErrorResponse, NotificationParams, NotificationsResponse};
use crate::routes::listings::AppState;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

/// Configure notification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::get().to(unread_notifications))
        .route(
            "/notifications/{id}/read",
            web::post().to(mark_notification_read),
        )
        .route("/notifications/clear", web::post().to(clear_notifications));
}

/// Unread notifications for a user
///
/// GET /api/v1/notifications?user_id={id}
async fn unread_notifications(
    state: web::Data<AppState>,
    params: web::Query<NotificationParams>,
) -> impl Responder {
    match state.store.unread_notifications(params.user_id).await {
        Ok(notifications) => HttpResponse::Ok().json(NotificationsResponse {
            user_id: params.user_id,
            count: notifications.len(),
            notifications,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch notifications for {}: {}", params.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch notifications".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Mark a notification as read
///
/// POST /api/v1/notifications/{id}/read?user_id={id}
///
/// The user_id must match the notification's owner; anything else reads as
/// not found.
async fn mark_notification_read(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    params: web::Query<NotificationParams>,
) -> impl Responder {
    let notification_id = path.into_inner();

    match state
        .store
        .mark_notification_read(notification_id, params.user_id)
        .await
    {
        Ok(true) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("Notification {} not found for this user", notification_id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to mark notification {} read: {}", notification_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to update notification".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Clear all notifications for a user
///
/// POST /api/v1/notifications/clear?user_id={id}
async fn clear_notifications(
    state: web::Data<AppState>,
    params: web::Query<NotificationParams>,
) -> impl Responder {
    match state.store.clear_notifications(params.user_id).await {
        Ok(cleared) => {
            HttpResponse::Ok().json(serde_json::json!({ "success": true, "cleared": cleared }))
        }
        Err(e) => {
            tracing::error!("Failed to clear notifications for {}: {}", params.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to clear notifications".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
