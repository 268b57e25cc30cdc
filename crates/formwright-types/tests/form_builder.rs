// End-to-end: build a form over a provider, run it against submissions,
// and check what reaches storage.

use formwright::{
    FormBuilder, FormElement, FormState, KeyFilter, MapValueProvider, ProvidedValue,
    SubmittedData, Value, ValueDefinition, ValueDefinitionProvider, ValueProvider, ValueSource,
    ValueStorage,
};
use formwright_types::{MonthType, StandardValueTypes};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

/// Provider + definitions + storage in one, remembering every save call.
struct SettingsProvider {
    inner: MapValueProvider,
    saved: RefCell<Vec<Vec<(String, Value)>>>,
}

impl SettingsProvider {
    fn new() -> Self {
        let mut inner = MapValueProvider::new();
        inner.insert("name", "Alice");
        inner.insert("month", 5);
        inner.define(
            "name",
            ValueDefinition::new("string", 0).with_label("Name"),
        );
        inner.define(
            "month",
            ValueDefinition::new("month", MonthType::LONG_NAME_OPTION).with_label("Birth month"),
        );
        Self {
            inner,
            saved: RefCell::new(Vec::new()),
        }
    }
}

impl ValueProvider for SettingsProvider {
    fn provided_value_keys(&self) -> Vec<String> {
        self.inner.provided_value_keys()
    }

    fn provided_value(&self, key: &str) -> anyhow::Result<Option<ProvidedValue>> {
        self.inner.provided_value(key)
    }
}

impl ValueDefinitionProvider for SettingsProvider {
    fn value_definition(&self, key: &str) -> anyhow::Result<Option<ValueDefinition>> {
        self.inner.value_definition(key)
    }
}

impl ValueStorage for SettingsProvider {
    fn save_values(&self, changed: &[(String, Value)]) -> anyhow::Result<()> {
        self.saved.borrow_mut().push(changed.to_vec());
        self.inner.save_values(changed)
    }
}

fn settings_builder() -> (FormBuilder, Rc<SettingsProvider>) {
    let provider = Rc::new(SettingsProvider::new());
    let mut builder = FormBuilder::new(ValueSource::full(provider.clone()));
    builder.add_value_types(&StandardValueTypes);
    (builder, provider)
}

#[test]
fn build_produces_one_representation_per_key() {
    let (builder, _) = settings_builder();
    let mut element = FormElement::new("/settings");

    let result = builder.build(&mut element, &KeyFilter::All).unwrap();

    let names: Vec<String> = result
        .representations()
        .iter()
        .filter_map(|r| r.name())
        .collect();
    assert_eq!(names, vec!["name", "month"]);
    assert_eq!(element.controls().len(), 2);
}

#[test]
fn month_control_lists_the_long_name_table() {
    let (builder, _) = settings_builder();
    let mut element = FormElement::new("/settings");
    builder.build(&mut element, &KeyFilter::All).unwrap();

    let markup = element.render().into_string();
    for name in [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ] {
        assert!(markup.contains(name), "missing option {name}");
    }
    // Short names are not offered under the long-name option
    assert!(!markup.contains(">Mar<"));
}

#[test]
fn untouched_submission_prefills_current_values() {
    let (builder, _) = settings_builder();
    let mut element = FormElement::new("/settings");

    let result = builder
        .build_and_run(
            &mut element,
            &SubmittedData::new(),
            "apply",
            &KeyFilter::All,
        )
        .unwrap();

    assert_eq!(result.state(), Some(&FormState::Untouched));
    assert_eq!(
        element.data().get("name"),
        Some(&Value::Text("Alice".into()))
    );
    // Stored month 5 appears under its long name
    assert_eq!(
        element.data().get("month"),
        Some(&Value::Text("May".into()))
    );
}

#[test]
fn changed_month_persists_its_scalar_only() {
    let (builder, provider) = settings_builder();
    let mut element = FormElement::new("/settings");

    let request =
        SubmittedData::from_urlencoded("apply=&name=Alice&month=March");

    let result = builder
        .build_and_run(&mut element, &request, "apply", &KeyFilter::All)
        .unwrap();

    assert_eq!(result.state(), Some(&FormState::Valid));

    // One save call, carrying only the changed key with its scalar
    let saved = provider.saved.borrow();
    assert_eq!(
        saved.as_slice(),
        &[vec![("month".to_string(), Value::Int(3))]]
    );
    assert_eq!(provider.inner.value("month"), Some(Value::Int(3)));
    assert_eq!(
        provider.inner.value("name"),
        Some(Value::Text("Alice".into()))
    );
}

#[test]
fn unknown_month_choice_never_reaches_storage() {
    let (builder, provider) = settings_builder();
    let mut element = FormElement::new("/settings");

    let request = SubmittedData::from_urlencoded("apply=&name=Alice&month=Smarch");

    let result = builder
        .build_and_run(&mut element, &request, "apply", &KeyFilter::All)
        .unwrap();

    let errors = result.state().unwrap().errors().expect("invalid state");
    assert!(errors.contains_key("month"));
    assert!(provider.saved.borrow().is_empty());
    assert_eq!(provider.inner.value("month"), Some(Value::Int(5)));
}

#[test]
fn key_filter_limits_the_build() {
    let (builder, _) = settings_builder();
    let mut element = FormElement::new("/settings");

    let result = builder
        .build(&mut element, &KeyFilter::keys(["month"]))
        .unwrap();

    assert_eq!(result.representations().len(), 1);
    assert_eq!(
        result.representations()[0].name(),
        Some("month".to_string())
    );
}

#[test]
fn saving_twice_is_idempotent() {
    let (builder, provider) = settings_builder();

    let request = SubmittedData::from_urlencoded("apply=&name=Alice&month=March");

    let mut element = FormElement::new("/settings");
    builder
        .build_and_run(&mut element, &request, "apply", &KeyFilter::All)
        .unwrap();
    let after_first = provider.inner.value("month");

    let mut element = FormElement::new("/settings");
    builder
        .build_and_run(&mut element, &request, "apply", &KeyFilter::All)
        .unwrap();

    assert_eq!(provider.inner.value("month"), after_first);
    assert_eq!(provider.inner.value("month"), Some(Value::Int(3)));
}
