use chrono::{DateTime, Duration, Utc};

use super::fixture_meta;
use crate::editor::{Collection, Lens, References};
use crate::model::email::{
    Campaign, CampaignStatus, EmailTemplate, RecipientFilter, Segment, TemplateCategory,
    TemplateStyling, TemplateVariable,
};
use crate::model::record::{Clock, RecordId};
use crate::model::value::{FieldType, FieldValue};
use crate::shell::{Aggregate, Fixtures, StatCard, TabSpec};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmailTemplateConfig {
    pub templates: Collection<EmailTemplate>,
    pub categories: Collection<TemplateCategory>,
    pub variables: Collection<TemplateVariable>,
    pub campaigns: Collection<Campaign>,
}

pub const TEMPLATES: Lens<EmailTemplateConfig, EmailTemplate> =
    lens!(EmailTemplateConfig, templates: EmailTemplate);
pub const CATEGORIES: Lens<EmailTemplateConfig, TemplateCategory> =
    lens!(EmailTemplateConfig, categories: TemplateCategory);
pub const VARIABLES: Lens<EmailTemplateConfig, TemplateVariable> =
    lens!(EmailTemplateConfig, variables: TemplateVariable);
pub const CAMPAIGNS: Lens<EmailTemplateConfig, Campaign> =
    lens!(EmailTemplateConfig, campaigns: Campaign);

impl Aggregate for EmailTemplateConfig {
    const TITLE: &'static str = "Plantillas de correo";

    fn tabs() -> Vec<TabSpec> {
        vec![
            TabSpec::new(TEMPLATES.name, "Plantillas"),
            TabSpec::new(CATEGORIES.name, "Categorías"),
            TabSpec::new(VARIABLES.name, "Variables"),
            TabSpec::new(CAMPAIGNS.name, "Campañas"),
        ]
    }

    fn stats(&self, _now: DateTime<Utc>) -> Vec<StatCard> {
        let scheduled = self
            .campaigns
            .iter()
            .filter(|c| c.status == CampaignStatus::Scheduled)
            .count();
        vec![
            StatCard::for_collection("Plantillas", &self.templates),
            StatCard::for_collection("Categorías", &self.categories),
            StatCard::for_collection("Variables", &self.variables),
            StatCard::for_collection("Campañas", &self.campaigns)
                .detail(format!("{scheduled} programadas")),
        ]
    }

    fn references(&self) -> References {
        References::new()
            .with(TEMPLATES.name, self.templates.ref_options())
            .with(CATEGORIES.name, self.categories.ref_options())
    }
}

impl Fixtures for EmailTemplateConfig {
    fn fixtures(clock: &dyn Clock) -> Self {
        let now = clock.now();
        let categories = vec![
            TemplateCategory {
                meta: fixture_meta("cat-onboarding", now),
                name: "Bienvenida".into(),
                description: Some("Correos para clientes nuevos".into()),
                color: "#3B82F6".into(),
                is_active: true,
            },
            TemplateCategory {
                meta: fixture_meta("cat-billing", now),
                name: "Facturación".into(),
                description: None,
                color: "#10B981".into(),
                is_active: true,
            },
            TemplateCategory {
                meta: fixture_meta("cat-legacy", now),
                name: "Heredadas".into(),
                description: Some("Plantillas anteriores a la migración".into()),
                color: "#9CA3AF".into(),
                is_active: false,
            },
        ];

        let templates = vec![
            EmailTemplate {
                meta: fixture_meta("tpl-welcome", now),
                name: "Bienvenida".into(),
                subject: "Hola {{first_name}}, bienvenido".into(),
                category_id: Some(RecordId::new("cat-onboarding")),
                html_body: "<h1>Hola {{first_name}}</h1><p>Gracias por unirte a {{company_name}}.</p>".into(),
                text_body: Some("Hola {{first_name}}, gracias por unirte.".into()),
                styling: TemplateStyling::default(),
                is_active: true,
            },
            EmailTemplate {
                meta: fixture_meta("tpl-invoice", now),
                name: "Factura disponible".into(),
                subject: "Tu factura {{invoice_number}}".into(),
                category_id: Some(RecordId::new("cat-billing")),
                html_body: "<p>Tu factura por {{amount}} ya está disponible.</p>".into(),
                text_body: None,
                styling: TemplateStyling {
                    primary_color: "#10B981".into(),
                    ..TemplateStyling::default()
                },
                is_active: true,
            },
            EmailTemplate {
                meta: fixture_meta("tpl-reactivation", now),
                name: "Reactivación".into(),
                subject: "Te echamos de menos".into(),
                category_id: None,
                html_body: "<p>Vuelve y descubre las novedades.</p>".into(),
                text_body: None,
                styling: TemplateStyling::default(),
                is_active: false,
            },
        ];

        let variables = vec![
            TemplateVariable {
                meta: fixture_meta("var-first-name", now),
                key: "first_name".into(),
                label: "Nombre".into(),
                value_type: FieldType::Text,
                default_value: Some(FieldValue::Text("cliente".into())),
                description: Some("Nombre de pila del contacto".into()),
                is_active: true,
            },
            TemplateVariable {
                meta: fixture_meta("var-company", now),
                key: "company_name".into(),
                label: "Empresa".into(),
                value_type: FieldType::Text,
                default_value: None,
                description: None,
                is_active: true,
            },
            TemplateVariable {
                meta: fixture_meta("var-amount", now),
                key: "amount".into(),
                label: "Importe".into(),
                value_type: FieldType::Number,
                default_value: Some(FieldValue::Number(0.0)),
                description: None,
                is_active: true,
            },
        ];

        let campaigns = vec![
            Campaign {
                meta: fixture_meta("cmp-spring", now),
                name: "Lanzamiento de primavera".into(),
                template_id: RecordId::new("tpl-welcome"),
                audience: RecipientFilter {
                    segment: Segment::Leads,
                    tags: vec!["primavera".into()],
                },
                scheduled_at: Some(now + Duration::days(7)),
                status: CampaignStatus::Scheduled,
            },
            Campaign {
                meta: fixture_meta("cmp-winback", now),
                name: "Recuperación de clientes".into(),
                template_id: RecordId::new("tpl-reactivation"),
                audience: RecipientFilter {
                    segment: Segment::Inactive,
                    tags: Vec::new(),
                },
                scheduled_at: None,
                status: CampaignStatus::Active,
            },
            Campaign {
                meta: fixture_meta("cmp-2023", now),
                name: "Cierre de año".into(),
                template_id: RecordId::new("tpl-retired"),
                audience: RecipientFilter::default(),
                scheduled_at: Some(now - Duration::days(120)),
                status: CampaignStatus::Completed,
            },
        ];

        Self {
            templates: Collection::from_records(templates),
            categories: Collection::from_records(categories),
            variables: Collection::from_records(variables),
            campaigns: Collection::from_records(campaigns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Entity;
    use crate::model::record::ManualClock;

    #[test]
    fn tabs_match_lens_names() {
        let ids: Vec<_> = EmailTemplateConfig::tabs().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["templates", "categories", "variables", "campaigns"]);
    }

    #[test]
    fn fixture_references_resolve_except_retired_template() {
        let config = EmailTemplateConfig::fixtures(&ManualClock::default());
        let refs = config.references();

        let spring = config.campaigns.get(&RecordId::new("cmp-spring")).unwrap();
        assert_eq!(spring.cell("template", &refs), "Bienvenida");
        let closed = config.campaigns.get(&RecordId::new("cmp-2023")).unwrap();
        assert_eq!(closed.cell("template", &refs), "Plantilla desconocida");
    }

    #[test]
    fn stats_count_active_records() {
        let config = EmailTemplateConfig::fixtures(&ManualClock::default());
        let stats = config.stats(chrono::Utc::now());
        assert_eq!(stats[0].value, "3");
        assert_eq!(stats[0].detail.as_deref(), Some("2 activos"));
        assert_eq!(stats[3].detail.as_deref(), Some("1 programadas"));
    }
}
