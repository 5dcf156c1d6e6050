use crate::config::AnalysisConfig;
use crate::error::{AppError, AppResult};
use crate::models::{BetRecord, BetResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Fewest records worth sending for analysis
pub const MIN_BETS_FOR_ANALYSIS: usize = 3;

pub const INSUFFICIENT_DATA_MESSAGE: &str =
    "Por favor, registre pelo menos 3 apostas para obter uma análise significativa.";
pub const MISSING_API_KEY_MESSAGE: &str =
    "Erro: Chave de API não configurada (GEMINI_API_KEY).";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Erro ao conectar com a IA. Verifique sua conexão ou chave de API.";
pub const EMPTY_ANALYSIS_MESSAGE: &str = "Não foi possível gerar uma análise no momento.";

/// Ledger fields shared with the analysis service (no id, no timestamp)
#[derive(Debug, Serialize)]
struct BetSummary<'a> {
    sport: &'a str,
    market: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    odds: Decimal,
    result: BetResult,
    #[serde(with = "rust_decimal::serde::float")]
    profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    stake: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl<'a> From<&'a BetRecord> for BetSummary<'a> {
    fn from(bet: &'a BetRecord) -> Self {
        Self {
            sport: &bet.sport,
            market: &bet.market,
            odds: bet.odds,
            result: bet.result,
            profit: bet.profit,
            stake: bet.stake,
            notes: bet.notes.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Natural-language performance report from an external LLM
pub struct AnalysisService {
    client: reqwest::Client,
    config: AnalysisConfig,
}

impl AnalysisService {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Produce a report for the ledger. Every failure degrades to a fixed message.
    pub async fn analyze(&self, bets: &[BetRecord]) -> String {
        if bets.len() < MIN_BETS_FOR_ANALYSIS {
            return INSUFFICIENT_DATA_MESSAGE.to_string();
        }

        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("Analysis requested without an API key");
            return MISSING_API_KEY_MESSAGE.to_string();
        };

        info!("Requesting analysis of {} bets from {}", bets.len(), self.config.model);

        match self.request_report(api_key, bets).await {
            Ok(Some(report)) => report,
            Ok(None) => EMPTY_ANALYSIS_MESSAGE.to_string(),
            Err(e) => {
                warn!("Analysis request failed: {}", e);
                CONNECTION_ERROR_MESSAGE.to_string()
            }
        }
    }

    async fn request_report(&self, api_key: &str, bets: &[BetRecord]) -> AppResult<Option<String>> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(bets)?,
                }],
            }],
        };

        let response = self
            .client
            .post(self.config.generate_content_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Analysis transport error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "Analysis service returned {}",
                status
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Unreadable analysis response: {}", e)))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}

/// Prompt embedding the ledger summary as JSON
pub fn build_prompt(bets: &[BetRecord]) -> AppResult<String> {
    let summary: Vec<BetSummary<'_>> = bets.iter().map(BetSummary::from).collect();
    let data = serde_json::to_string(&summary)?;

    Ok(format!(
        "Atue como um analista profissional de apostas esportivas.\n\
         Analise o histórico de apostas abaixo (formato JSON) e escreva um relatório curto e direto em Markdown.\n\
         \n\
         Dados das apostas:\n\
         {}\n\
         \n\
         O relatório deve conter:\n\
         1. Uma breve análise do desempenho geral.\n\
         2. Padrões identificados (ex: esporte ou faixa de odds mais lucrativa).\n\
         3. Uma dica prática para melhorar a lucratividade com base nesses dados.\n\
         4. Emojis para deixar a leitura agradável.\n\
         5. Texto em Português do Brasil.\n",
        data
    ))
}
