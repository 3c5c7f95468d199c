use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub datasets: DatasetSettings,
    pub models: ModelSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

/// Paths to the training CSVs the ensembles are fitted from at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSettings {
    pub diabetes: String,
    pub heart: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Serialized breast-cancer model. When the file is absent the service
    /// runs in degraded demo mode with a random stand-in model.
    pub breast_artifact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Settings {
    /// Defaults work from a repo checkout; every value can be overridden
    /// with `DISEASE_RISK__`-prefixed environment variables, e.g.
    /// `DISEASE_RISK__API__PORT=9000`.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("api.host", "0.0.0.0")?
            .set_default("api.port", 5000)?
            .set_default("datasets.diabetes", "data/diabetes.csv")?
            .set_default("datasets.heart", "data/framingham.csv")?
            .set_default("models.breast_artifact", "data/breast_model.json")?
            .set_default("logging.level", "info")?
            .add_source(
                config::Environment::with_prefix("DISEASE_RISK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api: ApiSettings {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            datasets: DatasetSettings {
                diabetes: "data/diabetes.csv".to_string(),
                heart: "data/framingham.csv".to_string(),
            },
            models: ModelSettings {
                breast_artifact: "data/breast_model.json".to_string(),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}
