use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use survey_lens::app::{handle_event, Action, SearchEvent};
use survey_lens::data::CacheState;
use survey_lens::domain::ResultKind;
use survey_lens::navigation::NavigationOutcome;
use survey_lens::{initialize, Config, RouteLocation, SurveyError};

const SURVEY_CSV: &str = "\
respondent,gender,household_income,region
1,Female,20-40k,North
2,Male,40-60k,South
3,Female,,North
";

const NAVIGATION_TOML: &str = r#"
[[sections]]
title = "Sample Characteristics"
path = "/sample-characteristics"

[[sections.subheadings]]
name = "Household"
path = "/sample-characteristics/household"
topics = ["Household Income", "Household Size", "Housing Type"]

[[sections.subheadings]]
name = "Demographics"
path = "/sample-characteristics/demographics"
topics = ["Gender", "Age Group"]

[[sections]]
title = "Wellbeing"
path = "/wellbeing"

[[sections.subheadings]]
name = "Financial Security"
path = "/wellbeing/financial-security"
topics = ["Income", "Savings"]
"#;

fn offline_config(dir: &Path) -> Config {
    Config {
        data_dir: None,
        relative_dir: dir.join("data").display().to_string(),
        data_file: "wave-one-survey.csv".to_string(),
        fallback_url: String::new(),
        ..Default::default()
    }
}

#[tokio::test]
async fn dataset_loads_once_from_primary_directory() {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    fs::create_dir_all(&public).unwrap();
    fs::write(public.join("wave-one-survey.csv"), SURVEY_CSV).unwrap();

    let config = Config {
        data_dir: Some(public.display().to_string()),
        ..offline_config(dir.path())
    };
    let dashboard = initialize(&config).unwrap();
    let cache = dashboard.cache();
    assert_eq!(cache.state(), CacheState::Empty);

    let (first, second) = tokio::join!(cache.load_data(), cache.load_data());
    let first = first.unwrap();
    assert!(Arc::ptr_eq(&first, &second.unwrap()));
    assert_eq!(first.len(), 3);
    assert_eq!(
        first.value_counts("gender"),
        vec![("Female".to_string(), 2), ("Male".to_string(), 1)]
    );

    // Removing the file must not matter once the dataset is cached.
    fs::remove_file(public.join("wave-one-survey.csv")).unwrap();
    let again = cache.load_data().await.unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(cache.state(), CacheState::Ready);
}

#[tokio::test]
async fn exhausted_sources_stay_retryable() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = initialize(&offline_config(dir.path())).unwrap();
    let cache = dashboard.cache();

    let err = cache.load_data().await.unwrap_err();
    match err.as_ref() {
        SurveyError::SourcesExhausted { attempts } => assert_eq!(attempts.len(), 2),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(cache.state(), CacheState::Failed);
    assert!(cache.cached().is_none());

    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("wave-one-survey.csv"), SURVEY_CSV).unwrap();

    let dataset = cache.load_data().await.unwrap();
    assert_eq!(dataset.headers()[1], "gender");
    assert_eq!(cache.state(), CacheState::Ready);
}

#[tokio::test]
async fn tab_delimited_config_file_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("wave-one-survey.csv"),
        "respondent\tgender\n1\tFemale\n2\tMale\n",
    )
    .unwrap();

    let config_path = dir.path().join("survey-lens.toml");
    fs::write(
        &config_path,
        format!(
            "relative_dir = \"{}\"\ndata_file = \"wave-one-survey.csv\"\nfallback_url = \"\"\ndelimiter = \"tab\"\n",
            data.display()
        ),
    )
    .unwrap();

    let config = Config::from_toml_file(&config_path).unwrap();
    let dataset = initialize(&config).unwrap().cache().load_data().await.unwrap();
    assert_eq!(dataset.column("gender").collect::<Vec<_>>(), vec!["Female", "Male"]);
}

#[test]
fn resolver_cascade_follows_priority() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = initialize(&offline_config(dir.path())).unwrap();
    let resolver = dashboard.resolver();
    let hint = Some("What type of housing do you live in?");
    let household = RouteLocation::new(
        "/sample-characteristics/household",
        Some("#chart-household-income"),
    );

    dashboard.topics().set_immediate("Gender");
    assert_eq!(resolver.resolve(hint, &household), "Gender");

    dashboard.topics().clear_immediate();
    assert_eq!(resolver.resolve(hint, &household), "Housing Type");
    assert_eq!(resolver.resolve(None, &household), "Household Income");

    let unknown = RouteLocation::new("/methodology/weighting", None);
    assert_eq!(resolver.resolve(None, &unknown), "Survey Responses");
}

#[test]
fn staged_override_is_visible_after_flush() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = initialize(&offline_config(dir.path())).unwrap();
    let location = RouteLocation::new("/methodology/weighting", None);

    dashboard.topics().set("Region");
    assert_eq!(dashboard.resolver().resolve(None, &location), "Survey Responses");

    assert!(dashboard.topics().flush());
    assert_eq!(dashboard.resolver().resolve(None, &location), "Region");
}

#[tokio::test(start_paused = true)]
async fn search_selection_navigates_across_sections() {
    let dir = tempfile::tempdir().unwrap();
    let navigation = dir.path().join("navigation.toml");
    fs::write(&navigation, NAVIGATION_TOML).unwrap();

    let config = Config {
        navigation_file: Some(navigation),
        settle_delay_ms: 150,
        ..offline_config(dir.path())
    };
    let dashboard = initialize(&config).unwrap();

    let mut search = dashboard.search_state();
    handle_event(&mut search, &SearchEvent::QueryChanged("income".to_string()));

    let results = search.results();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.kind == ResultKind::Topic));
    assert_eq!(results[0].section_key, "sample-characteristics");
    assert_eq!(results[1].section_key, "wellbeing");

    for _ in 0..4 {
        handle_event(&mut search, &SearchEvent::KeyDown);
    }
    assert_eq!(search.highlighted_index(), Some(1));

    let (_, actions) = handle_event(&mut search, &SearchEvent::Activate);
    let [Action::Navigate(result)] = actions.as_slice() else {
        panic!("expected one navigate action, got {actions:?}");
    };

    let routes = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&routes);
    let coordinator = dashboard.coordinator(move |path: &str| {
        recorded.lock().unwrap().push(path.to_string());
    });

    let start = tokio::time::Instant::now();
    let mut clicks = Vec::new();
    let outcome = coordinator
        .navigate(result, Some("sample-characteristics"), |topic, slug| {
            clicks.push((topic.to_string(), slug.map(String::from)));
        })
        .await;

    assert_eq!(outcome, NavigationOutcome::CrossSection { acknowledged: false });
    assert_eq!(*routes.lock().unwrap(), vec!["/wellbeing/financial-security".to_string()]);
    assert_eq!(
        clicks,
        vec![("Income".to_string(), Some("financial-security".to_string()))]
    );
    assert!(start.elapsed() >= Duration::from_millis(150));
    assert!(!search.is_open());
}

#[tokio::test(start_paused = true)]
async fn same_section_selection_skips_the_router() {
    let dir = tempfile::tempdir().unwrap();
    let navigation = dir.path().join("navigation.toml");
    fs::write(&navigation, NAVIGATION_TOML).unwrap();

    let config = Config {
        navigation_file: Some(navigation),
        ..offline_config(dir.path())
    };
    let dashboard = initialize(&config).unwrap();

    let mut search = dashboard.search_state();
    handle_event(&mut search, &SearchEvent::QueryChanged("household".to_string()));
    assert_eq!(search.results()[0].kind, ResultKind::Subheading);

    let (_, actions) = handle_event(&mut search, &SearchEvent::Select(0));
    let routes = Arc::new(Mutex::new(Vec::<String>::new()));
    let recorded = Arc::clone(&routes);
    let coordinator = dashboard.coordinator(move |path: &str| {
        recorded.lock().unwrap().push(path.to_string());
    });

    let mut topic = None;
    let outcome = coordinator
        .execute(&actions[0], Some("sample-characteristics"), |t, _| {
            topic = Some(t.to_string());
        })
        .await;

    assert_eq!(outcome, NavigationOutcome::InPlace);
    assert!(routes.lock().unwrap().is_empty());
    assert_eq!(topic.as_deref(), Some("Household Income"));
}
