//! Order Session Errors

use salvo::http::StatusError;
use tracing::error;

use till_app::domain::order_sessions::OrderSessionsServiceError;

pub(crate) fn into_status_error(error: OrderSessionsServiceError) -> StatusError {
    match error {
        OrderSessionsServiceError::NotFound => {
            StatusError::not_found().brief("No active order session")
        }
        OrderSessionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Conflicting order session")
        }
        OrderSessionsServiceError::InvalidItems(source) => {
            StatusError::bad_request().brief(format!("Invalid order session items: {source}"))
        }
        OrderSessionsServiceError::InvalidReference
        | OrderSessionsServiceError::MissingRequiredData
        | OrderSessionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order session payload")
        }
        OrderSessionsServiceError::Items(source) => {
            error!("failed to encode or decode order session items: {source}");

            StatusError::internal_server_error()
        }
        OrderSessionsServiceError::Sql(source) => {
            error!("order session storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use till_app::domain::order_sessions::items::InvalidItemError;

    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let corrupt = serde_json::from_str::<Vec<u8>>("{").err();

        let mut cases = vec![
            (OrderSessionsServiceError::NotFound, StatusCode::NOT_FOUND),
            (OrderSessionsServiceError::AlreadyExists, StatusCode::CONFLICT),
            (OrderSessionsServiceError::InvalidData, StatusCode::BAD_REQUEST),
            (
                OrderSessionsServiceError::InvalidItems(InvalidItemError::ZeroQuantity { index: 0 }),
                StatusCode::BAD_REQUEST,
            ),
        ];

        if let Some(source) = corrupt {
            cases.push((
                OrderSessionsServiceError::Items(source),
                StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }

        for (error, expected) in cases {
            let label = format!("{error:?}");

            assert_eq!(into_status_error(error).code, expected, "wrong status for {label}");
        }
    }
}
