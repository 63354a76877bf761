//! `askbot chat` — interactive question loop on the terminal.

use askbot_answer::{AnswerError, AnswerService, ensure_loaded, prompt};
use askbot_config::AppConfig;
use askbot_providers::GeminiProvider;
use askbot_store::SqliteFaqStore;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if config.gemini_api_key.is_none() {
        eprintln!();
        eprintln!("  AVISO: nenhuma chave do Gemini configurada.");
        eprintln!("  Defina GEMINI_API_KEY ou GOOGLE_GEMINI_API_KEY — as respostas");
        eprintln!("  falharão até que uma chave seja configurada.");
        eprintln!();
    }

    let store = SqliteFaqStore::new(&config.db_path);
    let fetcher = super::fetcher_from(&config);
    let knowledge = ensure_loaded(&store, fetcher.as_ref()).await?;

    let provider = Arc::new(GeminiProvider::new(
        config.gemini_api_key.clone().unwrap_or_default(),
    ));
    let service = AnswerService::new(provider, &config.model, knowledge.clone());

    println!();
    println!("  ASKBOT — Assistente do Jovem Programador");
    println!("  Base de conhecimento: {} dúvidas", knowledge.len());
    println!("  Faça uma pergunta, ou digite 'sair' para encerrar.");
    println!();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    print!("  Você > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        if input.eq_ignore_ascii_case("sair") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        if !input.is_empty() {
            match service.answer(input).await {
                Ok(answer) => {
                    println!();
                    println!("  ASKBOT > {answer}");
                    println!();
                }
                Err(AnswerError::NoKnowledge) => {
                    println!();
                    println!("  ASKBOT > {}", prompt::NO_KNOWLEDGE_ANSWER);
                    println!();
                }
                Err(e) => {
                    eprintln!("  [Erro] {e}");
                    println!();
                }
            }
        }

        print!("  Você > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Finalizando chat... Até logo!");
    Ok(())
}
