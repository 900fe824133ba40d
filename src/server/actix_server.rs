//! Implementation of the actix server.

use actix_web::{
    http::StatusCode,
    middleware::Logger,
    post,
    web::{Data, Json},
    App, HttpResponse, HttpServer, Responder, ResponseError,
};
use serde::{Deserialize, Serialize};

use crate::{hl7::input::Report, hl7::Encoder, mllp::send_messages};

use super::WebServerData;

#[derive(Debug)]
enum CustomError {
    /// The report could not be encoded.
    Encode(anyhow::Error),
    /// The messages could not be archived.
    Archive(anyhow::Error),
    /// The interface engine could not be reached or did not acknowledge.
    Transport(anyhow::Error),
}

impl std::fmt::Display for CustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomError::Encode(err) => write!(f, "encoding failed: {}", err),
            CustomError::Archive(err) => write!(f, "archiving failed: {}", err),
            CustomError::Transport(err) => write!(f, "sending failed: {}", err),
        }
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::Encode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CustomError::Archive(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ReceiveResponse {
            success: false,
            error: Some(self.to_string()),
            ..Default::default()
        })
    }
}

/// Result type of "/receivejson".
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ReceiveResponse {
    pub success: bool,
    pub tumor_ack: Option<String>,
    pub normal_ack: Option<String>,
    pub error: Option<String>,
}

/// Encode the posted report, send the messages and report the acknowledgements.
#[post("/receivejson")]
async fn receive_json(
    data: Data<WebServerData>,
    report: Json<Report>,
) -> actix_web::Result<impl Responder, CustomError> {
    let report = report.into_inner();
    tracing::info!(
        "received report for sample {}",
        &report.sample_state.sample_name
    );

    let encoder = Encoder::new(&report).map_err(|e| CustomError::Encode(e.into()))?;
    let messages = encoder
        .encode()
        .map_err(|e| CustomError::Encode(e.into()))?;
    data.conf
        .archive(&encoder.context().sample_id, &messages.tumor, &messages.normal)
        .map_err(CustomError::Archive)?;
    let acks = send_messages(&data.client, &messages.tumor, &messages.normal)
        .await
        .map_err(CustomError::Transport)?;

    Ok(Json(ReceiveResponse {
        success: true,
        tumor_ack: Some(acks.tumor),
        normal_ack: acks.normal,
        error: None,
    }))
}

#[actix_web::main]
pub async fn main(listen_host: &str, listen_port: u16, data: Data<WebServerData>) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(receive_json)
            .wrap(Logger::default())
    })
    .bind((listen_host, listen_port))?
    .run()
    .await
}
