use std::collections::HashSet;
use std::sync::Arc;

use admin_common::editor::{Collection, CollectionEditor, Entity};
use admin_common::form::FormData;
use admin_common::model::email::{
    Campaign, CampaignStatus, CategoryDraft, RecipientFilter, TemplateCategory,
};
use admin_common::model::record::{Clock, ManualClock, RecordId, RecordMeta};
use admin_common::screens::email::{CAMPAIGNS, CATEGORIES, EmailTemplateConfig};
use admin_common::shell::Fixtures;
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn valid_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,30}"
}

fn valid_color() -> impl Strategy<Value = String> {
    "#[0-9A-F]{6}"
}

fn valid_draft() -> impl Strategy<Value = CategoryDraft> {
    (valid_name(), valid_color(), any::<bool>()).prop_map(|(name, color, is_active)| {
        CategoryDraft {
            name,
            description: None,
            color,
            is_active,
        }
    })
}

/// Drafts that break at least one rule: blank name, or a color outside `#RRGGBB`.
fn invalid_draft() -> impl Strategy<Value = CategoryDraft> {
    prop_oneof![
        (" {0,3}", valid_color()).prop_map(|(name, color)| CategoryDraft::new(&name, &color)),
        (valid_name(), "[a-z]{1,8}").prop_map(|(name, color)| CategoryDraft::new(&name, &color)),
        (valid_name(), "#[0-9a-f]{5}").prop_map(|(name, color)| CategoryDraft::new(&name, &color)),
    ]
}

fn editor() -> (CollectionEditor<TemplateCategory>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let editor = CollectionEditor::with_clock(Collection::new(), clock.clone());
    (editor, clock)
}

proptest! {
    #[test]
    fn created_ids_are_unique(drafts in prop::collection::vec(valid_draft(), 1..40)) {
        let (mut editor, _) = editor();
        let mut ids = HashSet::new();
        for draft in drafts {
            let id = editor.create(draft).unwrap();
            prop_assert!(ids.insert(id));
        }
        let stored: HashSet<_> = editor.collection().iter().map(|c| c.id().clone()).collect();
        prop_assert_eq!(stored.len(), editor.collection().len());
        prop_assert_eq!(stored, ids);
    }

    #[test]
    fn update_preserves_identity(
        first in valid_draft(),
        second in valid_draft(),
        elapsed in 0i64..3_600,
    ) {
        let (mut editor, clock) = editor();
        let id = editor.create(first).unwrap();
        let before = editor.collection().get(&id).unwrap().clone();

        clock.advance_secs(elapsed);
        editor.update(&id, second.clone()).unwrap();
        let after = editor.collection().get(&id).unwrap();

        prop_assert_eq!(&after.meta.id, &before.meta.id);
        prop_assert_eq!(after.meta.created_at, before.meta.created_at);
        prop_assert!(after.meta.updated_at > before.meta.updated_at);
        prop_assert_eq!(&after.name, &second.name);
    }

    #[test]
    fn invalid_input_never_mutates(seed in valid_draft(), bad in invalid_draft()) {
        let (mut editor, _) = editor();
        let id = editor.create(seed).unwrap();
        let snapshot = editor.collection().clone();

        prop_assert!(editor.create(bad.clone()).is_err());
        prop_assert_eq!(editor.collection(), &snapshot);

        prop_assert!(editor.update(&id, bad).is_err());
        prop_assert_eq!(editor.collection(), &snapshot);
    }

    #[test]
    fn remove_is_idempotent(drafts in prop::collection::vec(valid_draft(), 1..10), pick in any::<prop::sample::Index>()) {
        let (mut editor, _) = editor();
        let ids: Vec<RecordId> = drafts.into_iter().map(|d| editor.create(d).unwrap()).collect();
        let target = pick.get(ids.as_slice()).clone();

        prop_assert!(editor.remove(&target));
        let after_first = editor.collection().clone();
        prop_assert!(!editor.remove(&target));
        prop_assert_eq!(editor.collection(), &after_first);
        prop_assert!(!editor.remove(&RecordId::new("never-existed")));
        prop_assert_eq!(editor.collection().len(), ids.len() - 1);
    }

    #[test]
    fn toggle_twice_restores_flag(draft in valid_draft()) {
        let (mut editor, _) = editor();
        let original = draft.is_active;
        let id = editor.create(draft).unwrap();

        prop_assert!(editor.toggle_active(&id));
        prop_assert_eq!(editor.collection().get(&id).unwrap().is_active, !original);
        prop_assert!(editor.toggle_active(&id));
        prop_assert_eq!(editor.collection().get(&id).unwrap().is_active, original);
    }

    #[test]
    fn editing_one_collection_leaves_siblings_alone(draft in valid_draft()) {
        let clock = Arc::new(ManualClock::default());
        let config = EmailTemplateConfig::fixtures(clock.as_ref());
        let mut editor = CollectionEditor::with_clock(CATEGORIES.view(&config).clone(), clock.clone());

        let id = editor.create(draft).unwrap();
        let next = editor.publish(&CATEGORIES, &config);

        prop_assert_eq!(&next.templates, &config.templates);
        prop_assert_eq!(&next.variables, &config.variables);
        prop_assert_eq!(&next.campaigns, &config.campaigns);
        prop_assert_eq!(next.categories.len(), config.categories.len() + 1);
        prop_assert_eq!(
            &next.categories.as_slice()[..config.categories.len()],
            config.categories.as_slice()
        );
        prop_assert!(next.categories.contains(&id));
    }
}

#[test]
fn campaign_cycle_table_is_total() {
    for status in CampaignStatus::iter() {
        let terminal = status.next().is_none();
        assert_eq!(terminal, status == CampaignStatus::Completed, "{status:?}");
    }
}

#[test]
fn toggling_a_completed_campaign_is_a_no_op() {
    let clock = Arc::new(ManualClock::default());
    let completed = Campaign {
        meta: RecordMeta::new(RecordId::new("done"), clock.now()),
        name: "Cierre".into(),
        template_id: RecordId::new("tpl"),
        audience: RecipientFilter::default(),
        scheduled_at: None,
        status: CampaignStatus::Completed,
    };
    let mut editor =
        CollectionEditor::with_clock(Collection::from_records(vec![completed.clone()]), clock.clone());

    clock.advance_secs(60);
    assert!(!editor.toggle_active(&RecordId::new("done")));
    assert_eq!(editor.collection().get(&RecordId::new("done")), Some(&completed));
}

#[test]
fn campaign_toggle_walks_the_cycle() {
    let clock = Arc::new(ManualClock::default());
    let config = EmailTemplateConfig::fixtures(clock.as_ref());
    let mut editor = CollectionEditor::with_clock(CAMPAIGNS.view(&config).clone(), clock);
    let id = RecordId::new("cmp-winback");

    editor.toggle_active(&id);
    assert_eq!(editor.collection().get(&id).unwrap().status, CampaignStatus::Paused);
    editor.toggle_active(&id);
    assert_eq!(editor.collection().get(&id).unwrap().status, CampaignStatus::Active);
}

#[test]
fn welcome_category_example() {
    let (mut editor, _) = editor();
    let mut form = FormData::new().with("name", "Welcome").with("color", "#3B82F6");
    form.set_flag("is_active", true);

    editor.open_create();
    let id = editor.submit(&form).unwrap();
    let created = editor.collection().get(&id).unwrap();
    assert_eq!(editor.collection().len(), 1);
    assert!(created.is_active);
    assert_eq!(created.meta.created_at, created.meta.updated_at);

    editor.open_create();
    assert!(editor.submit(&form.clone().with("color", "blue")).is_err());
    assert_eq!(editor.collection().len(), 1);
}
