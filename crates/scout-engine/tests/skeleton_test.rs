use scout_engine::protocol::{SelectorMatch, SelectorStrategy};
use scout_engine::scenario::{ElementType, PageDefinition};
use scout_engine::skeleton::{apply_selectors, extract_element_specs, page_object_spec};

const LOGIN_SKELETON: &str = r#"import { Page, Locator } from '@playwright/test';

export class LoginPage {
  constructor(private page: Page) {}

  get phoneNumberInput(): Locator {
    return this.page.locator('PLACEHOLDER_phoneNumberInput');
  }

  get passwordInput(): Locator {
    return this.page.locator("PLACEHOLDER_passwordInput");
  }

  get loginButton(): Locator {
    return this.page.locator('PLACEHOLDER_loginButton');
  }

  async login(phone: string, password: string) {
    await this.page.locator('PLACEHOLDER_phoneNumberInput').fill(phone);
    await this.passwordInput.fill(password);
    await this.loginButton.click();
  }
}
"#;

fn resolved(name: &str, selector: &str) -> SelectorMatch {
    SelectorMatch {
        selector: Some(selector.to_string()),
        strategy: Some(SelectorStrategy::Css),
        confidence: 0.7,
        ..SelectorMatch::unresolved(name, "id attribute")
    }
}

#[test]
fn test_extracts_distinct_placeholders_in_order() {
    let specs = extract_element_specs(LOGIN_SKELETON);

    let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["phoneNumberInput", "passwordInput", "loginButton"]);
    assert_eq!(specs[0].element_type, ElementType::Input);
    assert_eq!(specs[0].purpose, "phone number input");
    assert_eq!(specs[2].element_type, ElementType::Button);
}

#[test]
fn test_type_inferred_from_suffix() {
    let code = "PLACEHOLDER_termsCheckbox PLACEHOLDER_genderRadio PLACEHOLDER_countryDropdown \
                PLACEHOLDER_signupLink PLACEHOLDER_welcomeMessage PLACEHOLDER_submitBtn \
                PLACEHOLDER_bio_textarea";
    let types: Vec<ElementType> = extract_element_specs(code)
        .iter()
        .map(|s| s.element_type)
        .collect();

    assert_eq!(
        types,
        vec![
            ElementType::Checkbox,
            ElementType::Radio,
            ElementType::Select,
            ElementType::Link,
            ElementType::Text,
            ElementType::Button,
            ElementType::Input,
        ]
    );
}

#[test]
fn test_no_placeholders() {
    assert!(extract_element_specs("export class Empty {}").is_empty());
}

#[test]
fn test_page_object_spec_copies_page() {
    let page = PageDefinition {
        name: "LoginPage".into(),
        path: "/login".into(),
        description: Some("로그인".into()),
    };
    let spec = page_object_spec(&page, LOGIN_SKELETON);

    assert_eq!(spec.name, "LoginPage");
    assert_eq!(spec.path, "/login");
    assert_eq!(spec.description.as_deref(), Some("로그인"));
    assert_eq!(spec.required_elements.len(), 3);
}

#[test]
fn test_apply_selectors_replaces_resolved_only() {
    let matches = vec![
        resolved("phoneNumberInput", "this.page.locator('#phone')"),
        resolved("passwordInput", "this.page.getByPlaceholder('Password')"),
        SelectorMatch::unresolved("loginButton", "no candidates in snapshot"),
    ];

    let rewrite = apply_selectors(LOGIN_SKELETON, &matches);

    assert!(rewrite.code.contains("return this.page.locator('#phone');"));
    assert!(rewrite.code.contains("await this.page.locator('#phone').fill(phone);"));
    assert!(rewrite.code.contains("return this.page.getByPlaceholder('Password');"));
    assert!(rewrite.code.contains("this.page.locator('PLACEHOLDER_loginButton')"));
    assert!(!rewrite.code.contains("PLACEHOLDER_phoneNumberInput"));
    assert_eq!(rewrite.replaced, vec!["phoneNumberInput".to_string(), "passwordInput".to_string()]);
    assert_eq!(rewrite.unresolved, vec!["loginButton".to_string()]);
}

#[test]
fn test_apply_selectors_without_matches_is_identity() {
    let rewrite = apply_selectors(LOGIN_SKELETON, &[]);
    assert_eq!(rewrite.code, LOGIN_SKELETON);
    assert!(rewrite.replaced.is_empty());
    assert_eq!(rewrite.unresolved.len(), 3);
}
