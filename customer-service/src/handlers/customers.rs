use crate::dtos::{CustomerRequest, CustomerResponse};
use crate::models::Customer;
use crate::services::record_customer_operation;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Return all customers
#[utoipa::path(
    get,
    path = "/customers",
    responses(
        (status = 200, description = "All stored customers", body = [CustomerResponse]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let result = state
        .repository
        .list_all()
        .await
        .map_err(AppError::from)
        .map(|customers| customers.into_iter().map(CustomerResponse::from).collect());

    observe("list", result).map(Json)
}

/// Return a single customer
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = String, Path, description = "Customer identifier (24 hex characters)")),
    responses(
        (status = 200, description = "The customer", body = CustomerResponse),
        (status = 404, description = "No customer with this id", body = ErrorResponse)
    ),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerResponse>, AppError> {
    let result = find_existing(&state, &id).await;
    observe("get", result).map(|customer| Json(customer.into()))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created",
            headers(("Location" = String, description = "URL of the new customer"))),
        (status = 400, description = "Missing or empty field, or malformed id", body = ErrorResponse),
        (status = 409, description = "A customer with the supplied id already exists", body = ErrorResponse)
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = observe("create", create(&state, payload).await)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/customers/{}", id.to_hex()))],
    ))
}

/// Replace all fields of a customer
#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(("id" = String, Path, description = "Customer identifier (24 hex characters)")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated"),
        (status = 400, description = "Missing or empty field", body = ErrorResponse),
        (status = 404, description = "No customer with this id", body = ErrorResponse)
    ),
    tag = "Customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    observe("update", update(&state, &id, payload).await).map(|_| StatusCode::OK)
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(("id" = String, Path, description = "Customer identifier (24 hex characters)")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "No customer with this id", body = ErrorResponse)
    ),
    tag = "Customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    observe("delete", delete(&state, &id).await).map(|_| StatusCode::NO_CONTENT)
}

async fn find_existing(state: &AppState, id: &str) -> Result<Customer, AppError> {
    state
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Customer not found")))
}

async fn create(
    state: &AppState,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<ObjectId, AppError> {
    let Json(request) = payload.map_err(reject_body)?;
    let requested_id = request.requested_id()?;
    let customer = request.into_customer(requested_id)?;

    let id = state.repository.insert(customer).await?;
    tracing::info!(customer_id = %id, "Customer created");
    Ok(id)
}

async fn update(
    state: &AppState,
    id: &str,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<(), AppError> {
    // Existence wins over body validation
    let existing = find_existing(state, id).await?;

    let Json(request) = payload.map_err(reject_body)?;
    let customer = request.into_customer(existing.id)?;

    state.repository.update(id, &customer).await?;
    tracing::info!(customer_id = %id, "Customer updated");
    Ok(())
}

async fn delete(state: &AppState, id: &str) -> Result<(), AppError> {
    find_existing(state, id).await?;

    state.repository.delete(id).await?;
    tracing::info!(customer_id = %id, "Customer deleted");
    Ok(())
}

fn reject_body(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(anyhow::anyhow!(
        "Invalid request body: {}",
        rejection.body_text()
    ))
}

fn observe<T>(operation: &'static str, result: Result<T, AppError>) -> Result<T, AppError> {
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) => match e.status_code() {
            StatusCode::BAD_REQUEST => "invalid",
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::CONFLICT => "conflict",
            _ => "error",
        },
    };
    record_customer_operation(operation, outcome);
    result
}
