use pretty_assertions::assert_eq;
use tempfile::tempdir;

use tessera::command::{parse_statement, Statement, UseStatement};
use tessera::common::{NamespaceName, TesseraConfig};
use tessera::datamodel::{Namespace, NamespaceStore};
use tessera::shell::{OutputFormat, Session};
use tessera::{BootstrapError, ControlPlane};

const CONFIG: &str = r#"
    prompt = "acme-ops"

    [[users]]
    username = "admin"
    admin = true

    [[users]]
    username = "wile"
    roles = { "acme" = ["builder"], "acme.example" = ["viewer", "janitor"] }

    [[users]]
    username = "roadrunner"

    [[namespaces]]
    name = "acme"
    grants = { "builder" = ["create.namespace", "show.namespaces"] }

    [[namespaces]]
    name = "acme.example"
    grants = { "janitor" = ["drop.namespace"], "viewer" = ["show.namespaces"] }
"#;

fn name(s: &str) -> NamespaceName {
    s.parse().unwrap()
}

fn control_plane() -> ControlPlane {
    ControlPlane::from_config(&TesseraConfig::from_toml(CONFIG).unwrap()).unwrap()
}

async fn run_script(plane: &ControlPlane, session: &mut Session, script: &str) -> Vec<String> {
    let mut output = Vec::new();
    plane
        .session_loop()
        .with_prompt_shown(false)
        .run(session, script.as_bytes(), &mut output)
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_admin_uses_existing_namespace() {
    let plane = control_plane();
    let mut session = plane.open_session("admin").unwrap();

    let output = run_script(&plane, &mut session, "USE acme.example\n").await;

    assert_eq!(output, vec!["OK"]);
    assert_eq!(session.namespace(), Some(&name("acme.example")));
    assert_eq!(plane.session_loop().prompt_for(&session), "acme-ops: acme.example> ");
}

#[tokio::test]
async fn test_user_without_roles_cannot_create_root() {
    let plane = control_plane();
    let mut session = plane.open_session("roadrunner").unwrap();

    let output = run_script(&plane, &mut session, "CREATE NAMESPACE globex\n").await;

    assert_eq!(
        output,
        vec!["Unauthorized: root namespaces can only be created by an admin"]
    );
    assert!(!plane.namespaces().exists(&name("globex")).unwrap());
}

#[tokio::test]
async fn test_bad_statement_reports_position() {
    let plane = control_plane();
    let mut session = plane.open_session("wile").unwrap();

    let output = run_script(&plane, &mut session, "a bad statement.\n").await;

    assert_eq!(
        output,
        vec!["found a, expected USE, CREATE, SHOW, DROP at line 1, char 1"]
    );
}

#[tokio::test]
async fn test_delegated_namespace_management() {
    let plane = control_plane();
    let mut session = plane.open_session("wile").unwrap();

    let script = "\
        CREATE NAMESPACE acme.widgets\n\
        CREATE NAMESPACE acme.widgets\n\
        CREATE NAMESPACE acme.example.deep\n\
        CREATE NAMESPACE globex.labs\n\
        USE acme.widgets\n\
        USE acme.example\n\
        SHOW NAMESPACES\n\
        DROP NAMESPACE acme.example\n\
        SHOW NAMESPACES\n";

    let output = run_script(&plane, &mut session, script).await;

    assert_eq!(
        output,
        vec![
            "OK: namespace created",
            "NamespaceAlreadyExists: acme.widgets",
            "Unauthorized: cannot create namespace 'acme.example.deep'",
            "NamespaceDoesNotExist: globex",
            "Unauthorized",
            "OK",
            "OK",
            "acme",
            "acme.example",
            "OK: namespace dropped",
            "OK",
            "acme",
        ]
    );
    // the dropped namespace stays selected until the next successful USE
    assert_eq!(session.namespace(), Some(&name("acme.example")));

    let acme = plane.namespaces().get(&name("acme")).unwrap();
    assert_eq!(acme.children(), vec![name("acme.widgets")]);
}

#[tokio::test]
async fn test_show_without_grant_lists_nothing() {
    let plane = control_plane();
    let config = TesseraConfig::from_toml(
        r#"
        [[users]]
        username = "coyote"
        roles = { "acme" = ["janitor"] }

        [[namespaces]]
        name = "acme"
        grants = { "janitor" = ["drop.namespace"] }
        "#,
    )
    .unwrap();
    let other = ControlPlane::from_config(&config).unwrap();

    let mut session = other.open_session("coyote").unwrap();
    let output = run_script(&other, &mut session, "USE acme\nSHOW NAMESPACES\n").await;
    assert_eq!(output, vec!["OK", "OK"]);

    let mut session = plane.open_session("admin").unwrap();
    let output = run_script(&plane, &mut session, "SHOW NAMESPACES\n").await;
    assert_eq!(output, vec!["OK", "acme", "acme.example"]);
}

#[tokio::test]
async fn test_sessions_share_the_store() {
    let plane = control_plane();
    let mut admin = plane.open_session("admin").unwrap();
    let mut wile = plane.open_session("wile").unwrap();

    run_script(&plane, &mut admin, "CREATE NAMESPACE globex\n").await;
    let output = run_script(&plane, &mut wile, "CREATE NAMESPACE globex\n").await;

    assert_eq!(output, vec!["NamespaceAlreadyExists: globex"]);
}

#[tokio::test]
async fn test_json_session() {
    let plane = control_plane();
    let mut session = plane.open_session("admin").unwrap();

    let mut output = Vec::new();
    plane
        .session_loop()
        .with_prompt_shown(false)
        .with_format(OutputFormat::Json)
        .run(&mut session, "CREATE NAMESPACE globex\n".as_bytes(), &mut output)
        .await
        .unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "{\"status\":\"OK\",\"message\":\"namespace created\",\"success\":true}\n"
    );
}

#[tokio::test]
async fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tessera.toml");

    let config = TesseraConfig::from_toml(CONFIG).unwrap();
    config.save_to_file(&path).await.unwrap();

    let plane = ControlPlane::from_config(&TesseraConfig::from_file(&path).await.unwrap()).unwrap();
    assert_eq!(plane.namespaces().len(), 2);
    assert!(plane.open_session("roadrunner").is_ok());
}

#[test]
fn test_invalid_seed_is_rejected() {
    let config = TesseraConfig::from_toml(
        r#"
        [[namespaces]]
        name = "acme.example"
        "#,
    )
    .unwrap();

    assert!(matches!(
        ControlPlane::from_config(&config),
        Err(BootstrapError::Config(_))
    ));
}

#[test]
fn test_parse_use_statement() {
    assert_eq!(
        parse_statement("USE acme.example").unwrap(),
        Statement::Use(UseStatement::new(name("acme.example")))
    );
}
