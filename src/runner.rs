use crate::{
    client::ImageClient,
    config::RunnerConfig,
    error::{GenerateError, Result},
    logger,
    models::{ApiErrorBody, GenerationPayload, GenerationResponse, RawResponse, RunOutcome},
};

/// Sends the fixed payload once and turns the reply into a [`RunOutcome`].
pub struct RequestRunner {
    config: RunnerConfig,
}

impl RequestRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let client = ImageClient::new(&self.config)?;
        let payload = GenerationPayload::fixed();

        log::info!(
            "Requesting {} image ({}) from {}",
            payload.style_preset,
            payload.aspect_ratio,
            client.endpoint()
        );

        // Dropped unstopped on a send error, which logs it as abandoned.
        let mut timer = logger::timer("generate");
        let response = client.send(&payload).await?;
        timer.stop();

        interpret(response)
    }
}

/// 200 means a JSON body carrying `image_url`; every other status is passed through as text.
pub fn interpret(response: RawResponse) -> Result<RunOutcome> {
    if response.status != 200 {
        match ApiErrorBody::parse(&response.body).and_then(|body| body.summary()) {
            Some(summary) => log::warn!("API returned {}: {}", response.status, summary),
            None => log::warn!("API returned {}", response.status),
        }
        return Ok(RunOutcome::ApiError {
            status: response.status,
            body: response.body,
        });
    }

    let parsed: GenerationResponse = serde_json::from_str(&response.body)
        .map_err(|e| GenerateError::ResponseError(format!("Invalid generation response: {}", e)))?;

    if !parsed.extra.is_empty() {
        let mut keys: Vec<&str> = parsed.extra.keys().map(String::as_str).collect();
        keys.sort_unstable();
        log::debug!("Additional response fields: {}", keys.join(", "));
    }

    parsed
        .image_url
        .map(RunOutcome::ImageUrl)
        .ok_or(GenerateError::MissingField("image_url"))
}

/// The single stderr line for a run that ended in an error.
pub fn fatal_line(err: &GenerateError) -> String {
    format!("{}: {}", env!("CARGO_PKG_NAME"), err)
}
