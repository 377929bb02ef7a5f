#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Menu tree filtering and lookup tests.

use campus_kernel::menu::{MenuItem, MenuRegistry, breadcrumb, filter_tree, find_by_path};
use campus_kernel::models::{UserInfo, parse_session_user};
use campus_test_utils::menus::{folder, guarded, leaf, school_tree};
use campus_test_utils::{core_user, test_user};
use serde_json::{Value, json};

fn tree(value: Value) -> Vec<MenuItem> {
    serde_json::from_value(value).unwrap()
}

fn user(payload: Value) -> Option<UserInfo> {
    parse_session_user(payload)
}

fn keys(items: &[MenuItem]) -> Vec<&str> {
    items.iter().map(|i| i.key.as_str()).collect()
}

#[test]
fn test_unguarded_leaf_only_for_plain_user() {
    let items = tree(json!([leaf("a", "/a"), guarded("b", "/b", &["x"])]));
    let plain = user(json!({"rights": [], "operation_right": [], "core_user": 0}));

    let out = filter_tree(&items, plain.as_ref());
    assert_eq!(keys(&out), vec!["a"]);
    assert_eq!(out[0].path.as_deref(), Some("/a"));
}

#[test]
fn test_withdrawal_item_with_operation_code() {
    let items = tree(json!([guarded("w", "/approvals/withdrawals", &["view_withdrawal"])]));
    let clerk = user(json!({"rights": [], "operation_right": ["11"], "core_user": 0}));

    assert_eq!(keys(&filter_tree(&items, clerk.as_ref())), vec!["w"]);
}

#[test]
fn test_core_user_sees_tree_unchanged() {
    let items = tree(school_tree());
    let core = user(json!({"core_user": "1"}));

    assert_eq!(filter_tree(&items, core.as_ref()), items);
}

#[test]
fn test_folder_with_all_children_hidden_disappears() {
    let items = tree(json!([folder("f", vec![guarded("c", "/c", &["missing"])])]));
    let plain = user(test_user(&[]).to_json());

    let out = filter_tree(&items, plain.as_ref());
    assert!(out.iter().all(|i| i.key != "f"));
    assert!(out.is_empty());
}

#[test]
fn test_unguarded_leaf_always_present() {
    let items = tree(school_tree());
    let users = [
        None,
        user(test_user(&[]).to_json()),
        user(test_user(&["tool_user"]).with_operation_code("15").to_json()),
        user(core_user().to_json()),
    ];

    for u in &users {
        let out = filter_tree(&items, u.as_ref());
        assert!(find_by_path(&out, "/").is_some());
    }
}

#[test]
fn test_order_is_preserved() {
    let items = tree(school_tree());
    let u = user(
        test_user(&["view_students", "tool_user"])
            .with_operation_code("11")
            .to_json(),
    );

    let out = filter_tree(&items, u.as_ref());
    assert_eq!(keys(&out), vec!["dashboard", "people", "approvals", "me"]);
    assert_eq!(keys(&out[1].children), vec!["students", "search"]);
    assert_eq!(keys(&out[2].children), vec!["withdrawals"]);
    assert_eq!(keys(&out[3].children), vec!["my-card", "profile"]);
}

#[test]
fn test_filter_is_idempotent() {
    let items = tree(school_tree());
    let u = user(test_user(&["sales_admin"]).with_operation_code("15").to_json());

    let once = filter_tree(&items, u.as_ref());
    let twice = filter_tree(&once, u.as_ref());
    assert_eq!(once, twice);
}

#[test]
fn test_no_user_keeps_only_unguarded_items() {
    let items = tree(school_tree());
    let out = filter_tree(&items, None);
    assert_eq!(keys(&out), vec!["dashboard"]);
}

#[test]
fn test_lookups_work_on_filtered_and_unfiltered_trees() {
    let items = tree(school_tree());
    let u = user(test_user(&["view_students"]).to_json());
    let filtered = filter_tree(&items, u.as_ref());

    for t in [&items, &filtered] {
        let found = find_by_path(t, "/students").unwrap();
        assert_eq!(found.key, "students");
        let trail: Vec<_> = breadcrumb(t, "/students")
            .into_iter()
            .map(|i| i.key.as_str())
            .collect();
        assert_eq!(trail, vec!["people", "students"]);
    }

    assert!(find_by_path(&filtered, "/approvals/withdrawals").is_none());
    assert!(breadcrumb(&filtered, "/approvals/withdrawals").is_empty());
}

#[test]
fn test_builtin_menu_for_plain_staff() {
    let registry = MenuRegistry::builtin().unwrap();
    let plain = user(test_user(&[]).to_json());
    let menu = registry.filtered_for(plain.as_ref());

    let roots = keys(menu.items());
    assert_eq!(roots, vec!["dashboard", "self-service"]);

    let me = &menu.items()[1];
    assert_eq!(
        keys(&me.children),
        vec![
            "my-card",
            "my-subjects",
            "subject-evaluate",
            "exit-permit",
            "graduation-wishes",
            "transcript",
            "profile",
        ]
    );
}

#[test]
fn test_builtin_menu_weekend_folder_needs_a_child() {
    let registry = MenuRegistry::builtin().unwrap();

    let planner = user(test_user(&[]).with_operation_code("14").to_json());
    let menu = registry.filtered_for(planner.as_ref());
    let trail: Vec<_> = menu
        .breadcrumb("/scheduling/weekend/plan")
        .into_iter()
        .map(|i| i.key.as_str())
        .collect();
    assert_eq!(trail, vec!["scheduling", "weekend", "plan"]);
    assert!(menu.find("/scheduling/weekend/special-dates").is_none());
    assert!(menu.find("/scheduling/timetable").is_none());
}

#[test]
fn test_builtin_menu_core_user_sees_everything() {
    let registry = MenuRegistry::builtin().unwrap();
    let core = user(core_user().to_json());
    let menu = registry.filtered_for(core.as_ref());

    assert_eq!(menu.items(), registry.items());
    assert_eq!(menu.len(), registry.len());
}

#[test]
fn test_resolve_parameterized_route_respects_permissions() {
    let registry = MenuRegistry::builtin().unwrap();

    let registrar = user(test_user(&["view_students"]).to_json());
    let route = registry
        .filtered_for(registrar.as_ref())
        .resolve("/students/1042")
        .unwrap();
    assert_eq!(route.item.key, "detail");
    assert_eq!(route.params.get("id").map(String::as_str), Some("1042"));
    assert_eq!(route.trail.len(), 3);

    let plain = user(test_user(&[]).to_json());
    assert!(
        registry
            .filtered_for(plain.as_ref())
            .resolve("/students/1042")
            .is_none()
    );
}
