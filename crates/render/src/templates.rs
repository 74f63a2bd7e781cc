//! HTML templates for the rendered artifacts.
//!
//! Layouts follow the official paper forms: a bordered header with the
//! administration name, a field grid per section, and a signature block
//! on the certificate of visit.

use chrono::Utc;

use douane_core::artifact::RenderError;
use douane_core::control::types::{Control, CustomsFine};
use douane_core::declaration::Declaration;
use douane_core::document::types::{Document, DocumentTemplate};

const ADMINISTRATION: &str = "Administration Douanière de Nouvelle-Calédonie";

const STYLE: &str = r"
body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; color: #333; }
.header { text-align: center; border-bottom: 2px solid #2563eb; padding-bottom: 20px; margin-bottom: 30px; }
.header.alert { border-bottom: 3px solid #dc2626; }
.title { font-size: 24px; font-weight: bold; margin-bottom: 10px; }
.title.alert { color: #dc2626; }
.subtitle { font-size: 14px; color: #6b7280; }
.section { margin-bottom: 25px; }
.section-title { font-size: 18px; font-weight: bold; color: #374151; border-bottom: 1px solid #e5e7eb; padding-bottom: 5px; margin-bottom: 15px; }
.field { margin-bottom: 12px; display: flex; justify-content: space-between; }
.field-label { font-weight: 600; color: #4b5563; width: 40%; }
.field-value { width: 55%; color: #111827; }
.warning-box { background-color: #fef2f2; border-left: 4px solid #dc2626; padding: 15px; margin: 20px 0; }
.amount-box { background-color: #fee2e2; border: 2px solid #dc2626; padding: 20px; text-align: center; margin: 20px 0; border-radius: 8px; }
.amount { font-size: 28px; font-weight: bold; color: #dc2626; }
.fiscal-impact { background-color: #fef3c7; padding: 15px; border-radius: 8px; border-left: 4px solid #f59e0b; margin: 20px 0; }
.signature-box { border: 2px solid #374151; padding: 20px; margin: 20px 0; min-height: 80px; }
.history { background-color: #f9fafb; padding: 15px; border-radius: 6px; margin-top: 20px; }
.history-item { margin-bottom: 8px; font-size: 13px; }
.footer { margin-top: 50px; padding-top: 20px; border-top: 1px solid #e5e7eb; font-size: 12px; color: #6b7280; text-align: center; }
";

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn field_row(label: &str, value: &str) -> String {
    format!(
        "<div class=\"field\"><div class=\"field-label\">{}:</div><div class=\"field-value\">{}</div></div>\n",
        escape(label),
        escape(value)
    )
}

fn generated_footer(lines: &[String]) -> String {
    let mut footer = String::from("<div class=\"footer\">\n");
    footer.push_str(&format!(
        "<p>Généré le {} UTC</p>\n",
        Utc::now().format("%d/%m/%Y à %H:%M")
    ));
    for line in lines {
        footer.push_str(&format!("<p>{}</p>\n", escape(line)));
    }
    footer.push_str("</div>\n");
    footer
}

/// Renders a filled document against its template.
pub(crate) fn document_html(document: &Document, template: &DocumentTemplate) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<div class=\"header\"><div class=\"title\">{ADMINISTRATION}</div><div class=\"subtitle\">Système de Gestion des Actes Administratifs</div></div>\n"
    ));

    body.push_str("<div class=\"section\"><div class=\"section-title\">Informations du Document</div>\n");
    body.push_str(&field_row("Titre", &document.title));
    body.push_str(&field_row("Type", document.document_type.code()));
    body.push_str(&field_row("Statut", document.status.as_str()));
    body.push_str(&field_row("Créé par", &document.created_by_name));
    body.push_str(&field_row(
        "Date de création",
        &document.created_at.format("%d/%m/%Y à %H:%M").to_string(),
    ));
    body.push_str("</div>\n");

    body.push_str("<div class=\"section\"><div class=\"section-title\">Contenu du Document</div>\n");
    for field in &template.fields {
        let value = document
            .content
            .get(&field.name)
            .map_or_else(|| "Non renseigné".to_string(), value_to_text);
        body.push_str(&field_row(&field.label, &value));
    }
    body.push_str("</div>\n");

    if let Some(sydonia) = &document.sydonia_data {
        body.push_str(
            "<div class=\"section\"><div class=\"section-title\">Données Sydonia</div>\n",
        );
        for (key, label) in [
            ("declaration_id", "N° Déclaration"),
            ("importer_name", "Importateur"),
            ("goods_description", "Description marchandises"),
        ] {
            let value = sydonia.get(key).map_or_else(|| "N/A".to_string(), value_to_text);
            body.push_str(&field_row(label, &value));
        }
        body.push_str("</div>\n");
    }

    body.push_str("<div class=\"section\"><div class=\"section-title\">Historique des Actions</div><div class=\"history\">\n");
    for action in &document.history {
        body.push_str(&format!(
            "<div class=\"history-item\"><strong>{}</strong> par {} le {}</div>\n",
            escape(&action.action),
            escape(&action.actor_name),
            action.timestamp.format("%d/%m/%Y à %H:%M")
        ));
    }
    body.push_str("</div></div>\n");

    body.push_str(&generated_footer(&[format!(
        "{ADMINISTRATION} - Système de Gestion des Actes Administratifs"
    )]));

    page(&body)
}

/// Renders a certificate of visit for a non-compliant control.
///
/// Requires the non-compliance fields to be recorded.
pub(crate) fn certificate_html(
    control: &Control,
    declaration: &Declaration,
) -> Result<String, RenderError> {
    let nc_type = control
        .non_compliance_type
        .ok_or_else(|| RenderError::Failed("control has no non-compliance type".to_string()))?;
    let details = control
        .non_compliance_details
        .as_deref()
        .ok_or_else(|| RenderError::Failed("control has no non-compliance details".to_string()))?;
    let regulation = control
        .applicable_regulation
        .as_deref()
        .ok_or_else(|| RenderError::Failed("control has no applicable regulation".to_string()))?;
    let fiscal_impact = control
        .fiscal_impact
        .ok_or_else(|| RenderError::Failed("control has no fiscal impact".to_string()))?;

    let mut body = String::new();
    body.push_str(&format!(
        "<div class=\"header alert\"><div class=\"title alert\">CERTIFICAT DE VISITE</div><div class=\"subtitle\">{ADMINISTRATION}</div></div>\n"
    ));
    body.push_str(
        "<div class=\"warning-box\"><strong>AVIS DE NON-CONFORMITÉ</strong><br>La déclaration en douane ci-dessous présente des non-conformités qui nécessitent une régularisation.</div>\n",
    );

    body.push_str(
        "<div class=\"section\"><div class=\"section-title\">Informations de la Déclaration</div>\n",
    );
    body.push_str(&field_row("N° Déclaration", &declaration.declaration_id));
    body.push_str(&field_row("Importateur", &declaration.importer_name));
    body.push_str(&field_row("Adresse", &declaration.importer_address));
    body.push_str(&field_row(
        "Description marchandises",
        &declaration.goods_description,
    ));
    body.push_str(&field_row("Pays d'origine", &declaration.origin_country));
    body.push_str(&field_row(
        "Valeur CFR",
        &format!("{} XPF", declaration.value_cfr),
    ));
    body.push_str("</div>\n");

    body.push_str(
        "<div class=\"section\"><div class=\"section-title\">Non-Conformité Constatée</div>\n",
    );
    body.push_str(&field_row("Type de non-conformité", nc_type.as_str()));
    body.push_str(&field_row("Détails", details));
    body.push_str(&field_row("Réglementation applicable", regulation));
    body.push_str("</div>\n");

    body.push_str(&format!(
        "<div class=\"fiscal-impact\"><div class=\"section-title\">Impact Fiscal</div><div style=\"font-size: 20px; font-weight: bold; color: #d97706;\">Montant des droits et taxes: {fiscal_impact} XPF</div></div>\n"
    ));

    body.push_str(&format!(
        "<div class=\"section\"><div class=\"section-title\">Validation du Déclarant</div>\n<p>Je soussigné(e), représentant de <strong>{}</strong>, reconnais avoir pris connaissance des non-conformités constatées et accepte les mesures correctives proposées.</p>\n<div class=\"signature-box\"><strong>Signature du déclarant:</strong><br><br>Date: _______________<br><br>Nom et qualité: ___________________________________<br><br>Signature:</div></div>\n",
        escape(&declaration.importer_name)
    ));

    body.push_str(&generated_footer(&[
        format!("{ADMINISTRATION} - Bureau de {}", declaration.customs_office),
        format!("Contrôle effectué par: {}", control.control_officer_name),
    ]));

    Ok(page(&body))
}

/// Renders a payment notice for a customs fine.
pub(crate) fn payment_notice_html(fine: &CustomsFine, declaration: &Declaration) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<div class=\"header alert\"><div class=\"title alert\">AVIS DE PAIEMENT</div><div class=\"subtitle\">{ADMINISTRATION}</div></div>\n"
    ));

    body.push_str(&format!(
        "<div class=\"amount-box\"><div>MONTANT À RÉGLER</div><div class=\"amount\">{} XPF</div></div>\n",
        fine.amount
    ));

    body.push_str(
        "<div class=\"section\"><div class=\"section-title\">Informations de l'Amende</div>\n",
    );
    body.push_str(&field_row(
        "N° Amende LO",
        fine.lo_number.as_deref().unwrap_or("En attente"),
    ));
    body.push_str(&field_row("N° Déclaration", &declaration.declaration_id));
    body.push_str(&field_row("Code réglementation", &fine.regulation_code));
    body.push_str(&field_row(
        "Date d'émission",
        &fine.created_at.format("%d/%m/%Y").to_string(),
    ));
    body.push_str("</div>\n");

    body.push_str(
        "<div class=\"section\"><div class=\"section-title\">Informations du Redevable</div>\n",
    );
    body.push_str(&field_row("Importateur", &declaration.importer_name));
    body.push_str(&field_row("Adresse", &declaration.importer_address));
    body.push_str("</div>\n");

    body.push_str(
        "<div class=\"section\"><div class=\"section-title\">Modalités de Paiement</div>\n<p><strong>Délai de paiement:</strong> 30 jours à compter de la date d'émission</p>\n<p><strong>Modes de paiement acceptés:</strong></p>\n<ul><li>Chèque à l'ordre de \"Administration Douanière NC\"</li><li>Virement bancaire</li><li>Paiement en espèces au bureau des douanes</li></ul></div>\n",
    );

    body.push_str(&generated_footer(&[
        ADMINISTRATION.to_string(),
        "Contact: douanes@gouv.nc".to_string(),
    ]));

    page(&body)
}

fn value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
