use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, ValueEnum};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ComparisonDataset, SimulationParameters, SimulationResult, Strategy, YearlyRecord, compare,
    simulate,
};
use crate::error::{ExportError, ParamError};
use crate::export::{
    CSV_FILE_NAME, CSV_MIME, XLSX_FILE_NAME, XLSX_MIME, format_currency, to_csv_string,
    to_xlsx_bytes,
};

pub const MIN_HORIZON_YEARS: u32 = 1;
pub const MAX_HORIZON_YEARS: u32 = 40;
pub const MAX_RETURN_RATE: f64 = 15.0;
pub const MAX_INFLATION_RATE: f64 = 10.0;

const COMPARISON_TITLE: &str = "Comparación de Estrategias de Inversión";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliStrategy {
    #[value(alias = "fixed")]
    FixedIncome,
    #[value(alias = "variable")]
    VariableIncome,
    Mixed,
}

impl From<CliStrategy> for Strategy {
    fn from(value: CliStrategy) -> Self {
        match value {
            CliStrategy::FixedIncome => Strategy::FixedIncome,
            CliStrategy::VariableIncome => Strategy::VariableIncome,
            CliStrategy::Mixed => Strategy::Mixed,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiStrategy {
    #[serde(
        alias = "fixedIncome",
        alias = "fixed_income",
        alias = "fixed",
        alias = "Renta fija"
    )]
    FixedIncome,
    #[serde(
        alias = "variableIncome",
        alias = "variable_income",
        alias = "variable",
        alias = "Renta variable"
    )]
    VariableIncome,
    #[serde(alias = "Mixta")]
    Mixed,
}

impl From<ApiStrategy> for CliStrategy {
    fn from(value: ApiStrategy) -> Self {
        match value {
            ApiStrategy::FixedIncome => CliStrategy::FixedIncome,
            ApiStrategy::VariableIncome => CliStrategy::VariableIncome,
            ApiStrategy::Mixed => CliStrategy::Mixed,
        }
    }
}

/// The seven projection inputs as command-line flags.
#[derive(Debug, Clone, Args)]
pub struct ProjectionArgs {
    #[arg(
        long,
        default_value_t = 100_000.0,
        allow_negative_numbers = true,
        help = "Savings already in the account"
    )]
    pub initial_balance: f64,
    #[arg(long, default_value_t = 5_000.0, allow_negative_numbers = true)]
    pub monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        allow_negative_numbers = true,
        help = "Expected annual return in percent, e.g. 7"
    )]
    pub annual_return_rate: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        allow_negative_numbers = true,
        help = "Expected annual inflation in percent"
    )]
    pub annual_inflation_rate: f64,
    #[arg(long, default_value_t = 30, help = "Years to project")]
    pub years: u32,
    #[arg(long, value_enum, default_value_t = CliStrategy::Mixed)]
    pub strategy: CliStrategy,
    #[arg(long, help = "Apply a 5 point return cut every 10th year")]
    pub include_crisis: bool,
}

impl Default for ProjectionArgs {
    fn default() -> Self {
        Self {
            initial_balance: 100_000.0,
            monthly_contribution: 5_000.0,
            annual_return_rate: 7.0,
            annual_inflation_rate: 3.0,
            years: 30,
            strategy: CliStrategy::Mixed,
            include_crisis: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    initial_balance: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_return_rate: Option<f64>,
    annual_inflation_rate: Option<f64>,
    #[serde(alias = "horizonYears")]
    years: Option<u32>,
    strategy: Option<ApiStrategy>,
    include_crisis: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonRow {
    strategy: Strategy,
    strategy_label: &'static str,
    year: u32,
    accumulated_balance: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    strategy: Strategy,
    strategy_label: &'static str,
    chart_title: String,
    comparison_title: &'static str,
    parameters: SimulationParameters,
    years: Vec<YearlyRecord>,
    final_balance: f64,
    total_contributed: f64,
    total_return: f64,
    estimated_monthly_pension: f64,
    total_return_formatted: String,
    estimated_monthly_pension_formatted: String,
    comparison: Vec<ComparisonRow>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_params(args: ProjectionArgs) -> Result<SimulationParameters, ParamError> {
    if !args.initial_balance.is_finite() || args.initial_balance < 0.0 {
        return Err(ParamError::InitialBalance(args.initial_balance));
    }

    if !args.monthly_contribution.is_finite() || args.monthly_contribution < 0.0 {
        return Err(ParamError::MonthlyContribution(args.monthly_contribution));
    }

    if !(0.0..=MAX_RETURN_RATE).contains(&args.annual_return_rate) {
        return Err(ParamError::ReturnRate {
            value: args.annual_return_rate,
            min: 0.0,
            max: MAX_RETURN_RATE,
        });
    }

    if !(0.0..=MAX_INFLATION_RATE).contains(&args.annual_inflation_rate) {
        return Err(ParamError::InflationRate {
            value: args.annual_inflation_rate,
            min: 0.0,
            max: MAX_INFLATION_RATE,
        });
    }

    if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&args.years) {
        return Err(ParamError::Horizon {
            value: args.years,
            min: MIN_HORIZON_YEARS,
            max: MAX_HORIZON_YEARS,
        });
    }

    Ok(SimulationParameters {
        initial_balance: args.initial_balance,
        monthly_contribution: args.monthly_contribution,
        annual_return_rate: args.annual_return_rate,
        annual_inflation_rate: args.annual_inflation_rate,
        horizon_years: args.years,
        strategy: args.strategy.into(),
        include_crisis: args.include_crisis,
    })
}

/// Runs the selected strategy plus the three-way comparison and packages both for output.
pub fn simulate_report(params: SimulationParameters) -> SimulateResponse {
    let result = simulate(params);
    let comparison = compare(params);
    build_simulate_response(params, result, &comparison)
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .route("/api/export.csv", get(export_csv_handler))
        .route("/api/export.xlsx", get(export_xlsx_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("pension HTTP API listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/api/simulate");

    axum::serve(listener, router()).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(query: Result<Query<SimulatePayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => simulate_handler_impl(payload),
        Err(rejection) => malformed(&rejection.body_text()),
    }
}

async fn simulate_post_handler(body: Result<Json<SimulatePayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => simulate_handler_impl(payload),
        Err(rejection) => malformed(&rejection.body_text()),
    }
}

fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let params = match params_from_payload(payload) {
        Ok(params) => params,
        Err(err) => return rejected(err),
    };
    debug!("simulate request: {params:?}");
    json_response(StatusCode::OK, simulate_report(params))
}

async fn export_csv_handler(query: Result<Query<SimulatePayload>, QueryRejection>) -> Response {
    let params = match export_params(query) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = simulate(params);
    match to_csv_string(&result) {
        Ok(body) => attachment_response(CSV_MIME, CSV_FILE_NAME, body.into_bytes()),
        Err(err) => export_failed(err),
    }
}

async fn export_xlsx_handler(query: Result<Query<SimulatePayload>, QueryRejection>) -> Response {
    let params = match export_params(query) {
        Ok(params) => params,
        Err(response) => return response,
    };
    let result = simulate(params);
    match to_xlsx_bytes(&result) {
        Ok(body) => attachment_response(XLSX_MIME, XLSX_FILE_NAME, body),
        Err(err) => export_failed(err),
    }
}

fn export_params(
    query: Result<Query<SimulatePayload>, QueryRejection>,
) -> Result<SimulationParameters, Response> {
    let Query(payload) = query.map_err(|rejection| malformed(&rejection.body_text()))?;
    params_from_payload(payload).map_err(rejected)
}

fn malformed(msg: &str) -> Response {
    warn!("malformed simulation request: {msg}");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn rejected(err: ParamError) -> Response {
    warn!("rejected simulation input: {err}");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn export_failed(err: ExportError) -> Response {
    error!("{err}");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn attachment_response(mime: &'static str, file_name: &str, body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{file_name}\"");
    with_cache_control((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

#[cfg(test)]
fn params_from_json(json: &str) -> Result<SimulationParameters, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    params_from_payload(payload).map_err(|e| e.to_string())
}

fn params_from_payload(payload: SimulatePayload) -> Result<SimulationParameters, ParamError> {
    let mut args = ProjectionArgs::default();

    if let Some(v) = payload.initial_balance {
        args.initial_balance = v;
    }
    if let Some(v) = payload.monthly_contribution {
        args.monthly_contribution = v;
    }
    if let Some(v) = payload.annual_return_rate {
        args.annual_return_rate = v;
    }
    if let Some(v) = payload.annual_inflation_rate {
        args.annual_inflation_rate = v;
    }
    if let Some(v) = payload.years {
        args.years = v;
    }
    if let Some(v) = payload.strategy {
        args.strategy = v.into();
    }
    if let Some(v) = payload.include_crisis {
        args.include_crisis = v;
    }

    build_params(args)
}

fn build_simulate_response(
    params: SimulationParameters,
    result: SimulationResult,
    comparison: &ComparisonDataset,
) -> SimulateResponse {
    SimulateResponse {
        strategy: params.strategy,
        strategy_label: params.strategy.label(),
        chart_title: format!("Proyección de Pensión - {}", params.strategy.label()),
        comparison_title: COMPARISON_TITLE,
        parameters: params,
        total_return_formatted: format_currency(result.total_return),
        estimated_monthly_pension_formatted: format_currency(result.estimated_monthly_pension),
        final_balance: result.final_balance,
        total_contributed: result.total_contributed,
        total_return: result.total_return,
        estimated_monthly_pension: result.estimated_monthly_pension,
        years: result.years,
        comparison: comparison
            .records
            .iter()
            .map(|record| ComparisonRow {
                strategy: record.strategy,
                strategy_label: record.strategy.label(),
                year: record.year,
                accumulated_balance: record.accumulated_balance,
            })
            .collect(),
    }
}
