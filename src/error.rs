use thiserror::Error;

/// Input rejected before it reaches the projection engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("--initial-balance must be a finite amount >= 0, got {0}")]
    InitialBalance(f64),
    #[error("--monthly-contribution must be a finite amount >= 0, got {0}")]
    MonthlyContribution(f64),
    #[error("--annual-return-rate must be between {min} and {max}, got {value}")]
    ReturnRate { value: f64, min: f64, max: f64 },
    #[error("--annual-inflation-rate must be between {min} and {max}, got {value}")]
    InflationRate { value: f64, min: f64, max: f64 },
    #[error("--years must be between {min} and {max}, got {value}")]
    Horizon { value: u32, min: u32, max: u32 },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
