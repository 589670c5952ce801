//! Page object lifecycle tests.
//!
//! These tests drive whole pages: binding from declarations, the
//! init/deinit lifecycle, and the event wrapping of click, set and reads.

use std::cell::RefCell;
use std::rc::Rc;

use rust_pom::components::{ComponentId, ComponentSpec, PageObject};
use rust_pom::core::{EngineConfig, EngineError, Environment, EventMask, Locator, TriggerEvent};
use rust_pom::metadata::{
    ComponentTypeDescriptor, ComponentTypeId, DeclarationRegistry, DeclaredBehavior,
    MetadataBinder, TriggerDeclaration, TriggerFactory,
};
use rust_pom::testing::{MemoryDriver, MemoryLog};
use rust_pom::triggers::{TermMatch, Trigger};

const PAGE: ComponentTypeId = ComponentTypeId::new(0);
const BUTTON: ComponentTypeId = ComponentTypeId::new(1);
const INPUT: ComponentTypeId = ComponentTypeId::new(2);
const HEADING: ComponentTypeId = ComponentTypeId::new(3);

type Journal = Rc<RefCell<Vec<String>>>;

struct LoginPage {
    page: PageObject,
    log: Rc<MemoryLog>,
    driver: Rc<MemoryDriver>,
    title: ComponentId,
    email: ComponentId,
    sign_in: ComponentId,
}

fn registry() -> DeclarationRegistry {
    let mut registry = DeclarationRegistry::new();
    registry.register(ComponentTypeDescriptor::new(PAGE, "page"));
    registry.register(ComponentTypeDescriptor::new(BUTTON, "button").with_trigger(
        TriggerDeclaration::new(
            DeclaredBehavior::LogInfo {
                message: "about to click {component}".into(),
            },
            TriggerEvent::BeforeClick,
        ),
    ));
    registry.register(ComponentTypeDescriptor::new(INPUT, "input"));
    registry.register(ComponentTypeDescriptor::new(HEADING, "heading"));
    registry
}

fn login_page(title_text: &str) -> LoginPage {
    let log = Rc::new(MemoryLog::new());
    let driver = Rc::new(
        MemoryDriver::new()
            .with_element(&[Locator::css("h1")], title_text)
            .with_element(&[Locator::css("form"), Locator::id("email")], "")
            .with_element(&[Locator::css("form"), Locator::id("sign-in")], "Sign in"),
    );
    let env = Environment::new(driver.clone(), log.clone());

    let mut page = PageObject::new(ComponentSpec::new("Login", PAGE), env);
    let root = page.root();
    let title = page
        .add(
            root,
            ComponentSpec::new("Title", HEADING)
                .located_by(Locator::css("h1"))
                .with_trigger(TriggerDeclaration::new(
                    DeclaredBehavior::VerifyContent {
                        matching: TermMatch::StartsWith,
                        values: vec!["Sign".into()],
                    },
                    TriggerEvent::OnPageObjectInit,
                )),
        )
        .unwrap();
    let form = page
        .add(root, ComponentSpec::new("Form", PAGE).located_by(Locator::css("form")))
        .unwrap();
    let email = page
        .add(form, ComponentSpec::new("Email", INPUT).located_by(Locator::id("email")))
        .unwrap();
    let sign_in = page
        .add(form, ComponentSpec::new("Sign In", BUTTON).located_by(Locator::id("sign-in")))
        .unwrap();

    let binder = MetadataBinder::new(registry(), TriggerFactory::new(&EngineConfig::default()));
    page.bind(&binder).unwrap();

    LoginPage {
        page,
        log,
        driver,
        title,
        email,
        sign_in,
    }
}

fn recorder(journal: &Journal, on: impl Into<EventMask>) -> Trigger {
    let journal = Rc::clone(journal);
    Trigger::from_fn("Recorder", on, move |ctx| {
        journal
            .borrow_mut()
            .push(format!("{}:{}", ctx.tree().get(ctx.component())?.name(), ctx.event()));
        Ok(())
    })
}

/// Init walks the tree parent first, then the page gets OnPageObjectInit.
#[test]
fn test_init_order() {
    let mut login = login_page("Sign in please");
    let journal: Journal = Rc::default();
    let events = [TriggerEvent::Init, TriggerEvent::OnPageObjectInit];

    let root = login.page.root();
    for id in login.page.tree().depth_first(root).unwrap() {
        login
            .page
            .tree_mut()
            .get_mut(id)
            .unwrap()
            .triggers_mut()
            .add([recorder(&journal, events)]);
    }

    login.page.init().unwrap();
    assert_eq!(
        *journal.borrow(),
        vec![
            "Login:Init",
            "Title:Init",
            "Form:Init",
            "Email:Init",
            "Sign In:Init",
            "Login:OnPageObjectInit",
        ]
    );
}

/// Property-declared content verification runs on page init.
#[test]
fn test_init_verifies_declared_content() {
    let mut login = login_page("Welcome");

    // The title's verification runs on its own OnPageObjectInit, which
    // the page does not dispatch to children.
    login.page.init().unwrap();

    let title = login.title;
    let err = login
        .page
        .execute(title, TriggerEvent::OnPageObjectInit)
        .unwrap_err();
    assert!(err.is_assertion());
    assert!(err.to_string().contains("Invalid \"Title\" heading content"));
    assert!(err.to_string().contains("Expected: start with \"Sign\""));
    assert!(err.to_string().contains("But was: \"Welcome\""));
    assert_eq!(login.log.open_sections(), 0);
}

/// Click fires BeforeClick, the access events, then AfterClick.
#[test]
fn test_click_wraps_access() {
    let mut login = login_page("Sign in");
    let journal: Journal = Rc::default();
    let sign_in = login.sign_in;
    login
        .page
        .tree_mut()
        .get_mut(sign_in)
        .unwrap()
        .triggers_mut()
        .add([recorder(
            &journal,
            [
                TriggerEvent::BeforeClick,
                TriggerEvent::AfterClick,
                TriggerEvent::BeforeAccess,
                TriggerEvent::AfterAccess,
            ],
        )]);

    login.page.click(sign_in).unwrap();

    assert_eq!(
        *journal.borrow(),
        vec![
            "Sign In:BeforeClick",
            "Sign In:BeforeAccess",
            "Sign In:AfterAccess",
            "Sign In:AfterClick",
        ]
    );
    assert_eq!(
        login.driver.actions(),
        vec!["click css=form > id=sign-in".to_string()]
    );
    assert!(login
        .log
        .messages()
        .contains(&"about to click Sign In".to_string()));
}

/// Set clears the field, types the value, and fires the set events.
#[test]
fn test_set_value() {
    let mut login = login_page("Sign in");
    let journal: Journal = Rc::default();
    let email = login.email;
    login
        .page
        .tree_mut()
        .get_mut(email)
        .unwrap()
        .triggers_mut()
        .add([recorder(&journal, [TriggerEvent::BeforeSet, TriggerEvent::AfterSet])]);

    login.page.set(email, "me@example.com").unwrap();

    assert_eq!(login.page.content(email).unwrap(), "me@example.com");
    assert_eq!(*journal.borrow(), vec!["Email:BeforeSet", "Email:AfterSet"]);
    login
        .page
        .verify_content(email)
        .end_with("@example.com")
        .unwrap();
}

/// Presence checks fire no events and never fail for a missing element.
#[test]
fn test_presence() {
    let mut login = login_page("Sign in");
    let email = login.email;

    assert!(login.page.exists(email).unwrap());
    login.driver.remove_element(&[Locator::css("form")]);
    assert!(login.page.missing(email).unwrap());
    login.page.verify_presence(email).be_false().unwrap();

    let err = login.page.content(email).unwrap_err();
    assert!(matches!(err, EngineError::NoSuchElement { .. }));
}

/// Deinit reports leaving before tearing the tree down.
#[test]
fn test_deinit_order() {
    let mut login = login_page("Sign in");
    let journal: Journal = Rc::default();
    let root = login.page.root();
    let title = login.title;

    login
        .page
        .tree_mut()
        .get_mut(root)
        .unwrap()
        .triggers_mut()
        .add([recorder(&journal, [TriggerEvent::OnPageObjectLeave, TriggerEvent::DeInit])]);
    login
        .page
        .tree_mut()
        .get_mut(title)
        .unwrap()
        .triggers_mut()
        .add([recorder(&journal, TriggerEvent::DeInit)]);

    login.page.deinit().unwrap();
    assert_eq!(
        *journal.borrow(),
        vec!["Login:OnPageObjectLeave", "Login:DeInit", "Title:DeInit"]
    );
}

/// Components without a locator can't be accessed.
#[test]
fn test_access_without_locator() {
    let mut login = login_page("Sign in");
    let root = login.page.root();
    let err = login.page.click(root).unwrap_err();
    assert!(matches!(err, EngineError::ElementFinderMissing { .. }));
}
