//! Secret collection and the `.env` file.

#![allow(clippy::expect_used)]

use birelay_deploy::application::services::secrets::{
    ADMIN_CHANNEL_PROMPT, TOKEN_PROMPT, TOKEN_RETRY_PROMPT, collect, write_env_file,
};
use birelay_deploy::domain::EnvKey;
use birelay_deploy::infra::HostFs;

use crate::fakes::{CollectingReporter, Sandbox, ScriptedPrompter};

#[test]
fn empty_tokens_are_rejected_with_a_distinct_prompt() {
    let sandbox = Sandbox::new();
    let prompter = ScriptedPrompter::new(&["", "   ", "tok-1", ""]);

    let env = collect(&sandbox.deployment, &prompter).expect("collects");

    assert_eq!(env.get(EnvKey::ManagerToken), Some("tok-1"));
    assert_eq!(
        prompter.prompts(),
        vec![
            TOKEN_PROMPT,
            TOKEN_RETRY_PROMPT,
            TOKEN_RETRY_PROMPT,
            ADMIN_CHANNEL_PROMPT
        ]
    );
    assert_ne!(TOKEN_PROMPT, TOKEN_RETRY_PROMPT);
}

#[test]
fn first_non_empty_token_is_accepted_without_retry() {
    let sandbox = Sandbox::new();
    let prompter = ScriptedPrompter::new(&["tok-1", "", "unused"]);

    collect(&sandbox.deployment, &prompter).expect("collects");

    assert_eq!(prompter.prompts(), vec![TOKEN_PROMPT, ADMIN_CHANNEL_PROMPT]);
    assert_eq!(prompter.remaining(), 1);
}

#[test]
fn blank_admin_channel_is_left_out() {
    let sandbox = Sandbox::new();
    let prompter = ScriptedPrompter::new(&["tok", "  "]);

    let env = collect(&sandbox.deployment, &prompter).expect("collects");

    assert!(!env.contains(EnvKey::AdminChannel));
    assert_eq!(
        env.get(EnvKey::DatabasePath).map(str::to_owned),
        Some(sandbox.deployment.database_path().display().to_string())
    );
}

#[test]
fn closed_terminal_aborts_collection() {
    let sandbox = Sandbox::new();
    let prompter = ScriptedPrompter::new(&["", ""]);

    assert!(collect(&sandbox.deployment, &prompter).is_err());
}

#[cfg(unix)]
#[test]
fn env_file_is_private_and_replaced_on_rewrite() {
    use std::os::unix::fs::PermissionsExt;

    let sandbox = Sandbox::new();
    std::fs::create_dir_all(sandbox.target()).expect("target dir");
    let reporter = CollectingReporter::default();

    let first = collect(&sandbox.deployment, &ScriptedPrompter::new(&["old", ""])).expect("first");
    write_env_file(&sandbox.deployment, &first, &HostFs, &reporter).expect("write");
    let second = collect(&sandbox.deployment, &ScriptedPrompter::new(&["new", ""])).expect("second");
    write_env_file(&sandbox.deployment, &second, &HostFs, &reporter).expect("rewrite");

    let path = sandbox.deployment.env_file_path();
    let contents = std::fs::read_to_string(&path).expect("readable");
    assert!(contents.contains("MANAGER_TOKEN=new"));
    assert!(!contents.contains("MANAGER_TOKEN=old"));
    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
