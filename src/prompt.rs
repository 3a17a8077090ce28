// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ReportError;
use crate::models::RawRecord;
use chrono::NaiveDate;

pub const CURRENCY_PREFIX: &str = "R$";

const REPORT_TEMPLATE: &str = "\
Atue como um analista de tráfego pago. Gere relatórios individuais para cada campanha com gasto.
Data do Relatório: {date}

⚠️ REGRAS DE FORMATAÇÃO OBRIGATÓRIAS:
1. Moeda: Use sempre {ccy} com VÍRGULA para decimais (ex: {ccy} 10,50 e não {ccy} 10.50).
2. Data: Use o formato DD/MM/YYYY.
3. Layout: Siga exatamente o modelo abaixo:

🔹 Relatório de Desempenho da Campanha

📌 Campanha: [NOME DA CAMPANHA]
📅 Data: {date}
🎯 Objetivo: [Se o nome tiver MSG é Geração de conversas, se tiver REC é Alcance]

Resultados principais:
✅ Conversas iniciadas: [VALOR]
✅ Investimento total do dia: {ccy} [VALOR COM VÍRGULA]
✅ Custo por conversa iniciada: {ccy} [VALOR COM VÍRGULA]
📢 Alcance: [VALOR] pessoas
👁️ Impressões: [VALOR]
🔁 Frequência: [VALOR COM VÍRGULA]
💸 CPM (custo por mil): {ccy} [VALOR COM VÍRGULA]
🖱️ Cliques (todos): [VALOR]
💰 CPC: {ccy} [VALOR COM VÍRGULA]
📈 CTR: [VALOR COM VÍRGULA]%

Efetividade: [1 frase de análise]

Recomendações: [2 tópicos curtos]
---
DADOS: ";

/// `2026-01-10` -> `10/01/2026`.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Full instruction text: persona, formatting rules, the report layout and
/// the records as compact JSON at the very end.
pub fn build_prompt(date: NaiveDate, records: &[RawRecord]) -> Result<String, ReportError> {
    let shown = format_report_date(date);
    let mut prompt = REPORT_TEMPLATE
        .replace("{date}", &shown)
        .replace("{ccy}", CURRENCY_PREFIX);
    prompt.push_str(&serde_json::to_string(records)?);
    Ok(prompt)
}
