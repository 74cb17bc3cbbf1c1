use async_trait::async_trait;
use scout_engine::backend::{Backend, BackendError, NavigationResult};
use scout_engine::flow::FlowExecutor;
use scout_engine::scenario::{ElementSpec, ElementType, PageObjectSpec};
use scout_engine::selector::SelectorFiller;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Serves a canned snapshot per path; paths in `broken` fail to navigate.
#[derive(Debug, Default)]
struct SiteBackend {
    pages: HashMap<String, String>,
    broken: Vec<String>,
    current: Option<String>,
    navigations: Vec<String>,
}

impl SiteBackend {
    fn page(mut self, path: &str, snapshot: &str) -> Self {
        self.pages.insert(path.to_string(), snapshot.to_string());
        self
    }
}

#[async_trait]
impl Backend for SiteBackend {
    async fn launch(&mut self) -> Result<(), BackendError> {
        Ok(())
    }
    async fn close(&mut self) -> Result<(), BackendError> {
        Ok(())
    }
    async fn is_ready(&self) -> bool {
        true
    }
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError> {
        self.navigations.push(url.to_string());
        if self.broken.iter().any(|b| b == url) {
            return Err(BackendError::Navigation(format!("{}: net::ERR_CONNECTION_REFUSED", url)));
        }
        self.current = Some(url.to_string());
        Ok(NavigationResult {
            url: url.to_string(),
            title: String::new(),
            status: 200,
        })
    }
    async fn snapshot(&mut self) -> Result<String, BackendError> {
        let current = self.current.as_deref().unwrap_or_default();
        Ok(self.pages.get(current).cloned().unwrap_or_default())
    }
    async fn evaluate_element(
        &mut self,
        _element: &str,
        reference: &str,
        _function: &str,
    ) -> Result<Option<Value>, BackendError> {
        Ok(Some(json!({ "tag": "input", "id": reference })))
    }
}

fn page(name: &str, path: &str, elements: Vec<ElementSpec>) -> PageObjectSpec {
    PageObjectSpec {
        name: name.to_string(),
        path: path.to_string(),
        description: None,
        required_elements: elements,
    }
}

#[tokio::test]
async fn test_page_without_elements_skips_navigation() {
    let mut backend = SiteBackend::default();
    let pages = vec![page("EmptyPage", "/empty", vec![])];

    let result = FlowExecutor::new(SelectorFiller::new(&mut backend))
        .execute(&pages)
        .await;

    assert!(!result.has_failures);
    let empty = result.page("EmptyPage").unwrap();
    assert!(empty.success);
    assert!(empty.selectors.is_empty());
    assert!(empty.missing_elements.is_empty());
    assert!(backend.navigations.is_empty());
}

#[tokio::test]
async fn test_all_resolved_page_succeeds() {
    let mut backend = SiteBackend::default().page(
        "/login",
        "- textbox \"Email\" [ref=e1]\n- button \"Log in\" [ref=e2]",
    );
    let pages = vec![page(
        "LoginPage",
        "/login",
        vec![
            ElementSpec::new("emailInput", "", ElementType::Input),
            ElementSpec::new("loginButton", "", ElementType::Button),
        ],
    )];

    let result = FlowExecutor::new(SelectorFiller::new(&mut backend))
        .execute(&pages)
        .await;

    assert!(!result.has_failures);
    let login = &result.pages[0];
    assert!(login.success);
    assert_eq!(login.path, "/login");
    assert_eq!(login.selectors.len(), 2);
    assert_eq!(
        login.selectors[0].selector.as_deref(),
        Some("this.page.locator('#e1')")
    );
    assert_eq!(login.error, None);
}

#[tokio::test]
async fn test_unresolved_elements_are_listed_missing() {
    let mut backend = SiteBackend::default().page("/login", "- textbox \"Email\" [ref=e1]");
    let pages = vec![page(
        "LoginPage",
        "/login",
        vec![
            ElementSpec::new("emailInput", "", ElementType::Input),
            ElementSpec::new("rememberCheckbox", "", ElementType::Checkbox),
        ],
    )];

    let result = FlowExecutor::new(SelectorFiller::new(&mut backend))
        .execute(&pages)
        .await;

    assert!(result.has_failures);
    let login = &result.pages[0];
    assert!(!login.success);
    assert_eq!(login.missing_elements, vec!["rememberCheckbox".to_string()]);
    assert_eq!(login.selectors.len(), 2);
    assert_eq!(login.error, None);
}

#[tokio::test]
async fn test_backend_failure_is_isolated_to_its_page() {
    let mut backend = SiteBackend::default().page("/dashboard", "- button \"Log out\" [ref=e3]");
    backend.broken.push("/login".to_string());
    let pages = vec![
        page(
            "LoginPage",
            "/login",
            vec![
                ElementSpec::new("emailInput", "", ElementType::Input),
                ElementSpec::new("loginButton", "", ElementType::Button),
            ],
        ),
        page(
            "DashboardPage",
            "/dashboard",
            vec![ElementSpec::new("logoutButton", "", ElementType::Button)],
        ),
    ];

    let result = FlowExecutor::new(SelectorFiller::new(&mut backend))
        .execute(&pages)
        .await;

    assert!(result.has_failures);
    assert_eq!(result.pages.len(), 2);

    let login = &result.pages[0];
    assert!(!login.success);
    assert!(login.selectors.is_empty());
    assert_eq!(
        login.missing_elements,
        vec!["emailInput".to_string(), "loginButton".to_string()]
    );
    assert!(login.error.as_deref().unwrap().contains("ERR_CONNECTION_REFUSED"));

    let dashboard = &result.pages[1];
    assert!(dashboard.success);
    assert_eq!(backend.navigations, vec!["/login".to_string(), "/dashboard".to_string()]);
}

#[tokio::test]
async fn test_no_pages() {
    let mut backend = SiteBackend::default();
    let result = FlowExecutor::new(SelectorFiller::new(&mut backend))
        .execute(&[])
        .await;

    assert!(result.pages.is_empty());
    assert!(!result.has_failures);
}

#[tokio::test]
async fn test_result_serializes_camel_case() {
    let mut backend = SiteBackend::default();
    backend.broken.push("/x".to_string());
    let pages = vec![page("XPage", "/x", vec![ElementSpec::new("a", "", ElementType::Text)])];

    let result = FlowExecutor::new(SelectorFiller::new(&mut backend))
        .execute(&pages)
        .await;
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["hasFailures"], true);
    assert_eq!(json["pages"][0]["pageName"], "XPage");
    assert_eq!(json["pages"][0]["missingElements"][0], "a");
}
