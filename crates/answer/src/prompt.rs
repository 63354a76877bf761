//! Prompt template for grounded answers.
//!
//! The rendered prompt carries the grounding rules, the two canned-answer
//! overrides, the full knowledge base as repeated `QUESTION:`/`ANSWER:`
//! blocks, and the literal user question. The model is told to answer
//! strictly from the supplied material.

use askbot_core::faq::KnowledgeBase;

/// Mandated reply for any question about a maximum age to join.
pub const MAX_AGE_ANSWER: &str = "Não existe idade máxima para participar do programa; \
     a única exigência é ter 16 anos completos.";

/// Mandated reply for cost/tuition questions. The source material states
/// the program is free.
pub const FREE_PROGRAM_ANSWER: &str =
    "O programa Jovem Programador é totalmente gratuito para os alunos.";

/// Substituted when the model returns empty text.
pub const EMPTY_COMPLETION_ANSWER: &str =
    "Desculpe, não consegui gerar uma resposta no momento. Tente novamente.";

/// Returned with HTTP 400 when the question is blank.
pub const EMPTY_QUESTION_ANSWER: &str = "Por favor, digite a sua pergunta.";

/// Returned with HTTP 500 when the model call fails.
pub const MODEL_FAILURE_ANSWER: &str =
    "Desculpe, ocorreu um erro ao processar a sua pergunta. Tente novamente mais tarde.";

/// Returned with HTTP 503 when the knowledge base is empty.
pub const NO_KNOWLEDGE_ANSWER: &str =
    "A base de conhecimento ainda não está disponível. Tente novamente mais tarde.";

/// Render the full grounding prompt for one user question.
pub fn render_prompt(knowledge: &KnowledgeBase, question: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("Você é o assistente virtual do programa Jovem Programador.\n\n");
    prompt.push_str("REGRAS:\n");
    prompt.push_str("- Responda APENAS com base no material fornecido abaixo.\n");
    prompt.push_str(
        "- Se a resposta não estiver no material, diga que não possui essa informação.\n",
    );
    prompt.push_str(&format!(
        "- Se a pergunta for sobre idade máxima para participar, responda exatamente: \"{MAX_AGE_ANSWER}\"\n"
    ));
    prompt.push_str(&format!(
        "- Se a pergunta for sobre custo, preço ou mensalidade, responda exatamente: \"{FREE_PROGRAM_ANSWER}\"\n"
    ));

    prompt.push_str("\nMATERIAL:\n");
    for pair in knowledge.pairs() {
        prompt.push_str(&format!(
            "QUESTION: {}\nANSWER: {}\n\n",
            pair.question, pair.answer
        ));
    }

    prompt.push_str(&format!("PERGUNTA DO USUÁRIO: {question}\n"));
    prompt
}
