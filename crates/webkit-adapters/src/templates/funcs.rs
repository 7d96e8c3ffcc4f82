//! Template helpers available to every embedded template.
//!
//! Each helper is registered twice: as a Tera function taking one argument
//! (`{{ gh_secret(name="TOKEN") }}`) and as a filter
//! (`{{ "github.sha" | gh_expression }}`).

use std::collections::HashMap;

use tera::{Tera, Value};

type StringFn = fn(&str) -> String;

/// Helper names and implementations, in registration order.
pub const HELPERS: [(&str, StringFn); 6] = [
    ("gh_expression", gh_expression),
    ("gh_var", gh_var),
    ("gh_secret", gh_secret),
    ("gh_input", gh_input),
    ("gh_env", gh_env),
    ("pretty_key", pretty_key),
];

/// `${{ expr }}`, which Tera cannot emit literally.
pub fn gh_expression(expr: &str) -> String {
    format!("${{{{ {expr} }}}}")
}

pub fn gh_var(name: &str) -> String {
    gh_expression(&format!("vars.{name}"))
}

pub fn gh_secret(name: &str) -> String {
    gh_expression(&format!("secrets.{name}"))
}

pub fn gh_input(name: &str) -> String {
    gh_expression(&format!("inputs.{name}"))
}

pub fn gh_env(name: &str) -> String {
    gh_expression(&format!("env.{name}"))
}

/// `snake_case` to `Title Case`.
///
/// Only the first letter of each word is touched, so `SSH_KEYS` stays
/// `SSH KEYS`. Runs of underscores collapse.
pub fn pretty_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn register(tera: &mut Tera) {
    for (name, helper) in HELPERS {
        tera.register_function(name, move |args: &HashMap<String, Value>| {
            single_arg(name, args).map(|s| Value::String(helper(&s)))
        });
        tera.register_filter(
            name,
            move |value: &Value, _args: &HashMap<String, Value>| {
                as_text(name, value).map(|s| Value::String(helper(&s)))
            },
        );
    }
}

fn single_arg(name: &str, args: &HashMap<String, Value>) -> tera::Result<String> {
    let mut values = args.values();
    match (values.next(), values.next()) {
        (Some(value), None) => as_text(name, value),
        _ => Err(tera::Error::msg(format!(
            "{name} takes exactly one argument, got {}",
            args.len()
        ))),
    }
}

fn as_text(name: &str, value: &Value) -> tera::Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(tera::Error::msg(format!(
            "{name} expects a string, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    #[test]
    fn github_expressions() {
        assert_eq!(gh_expression("github.sha"), "${{ github.sha }}");
        assert_eq!(gh_expression(""), "${{  }}");
        assert_eq!(
            gh_expression("steps.version.outputs.version"),
            "${{ steps.version.outputs.version }}"
        );
        assert_eq!(gh_var("MY_VAR"), "${{ vars.MY_VAR }}");
        assert_eq!(gh_var(""), "${{ vars. }}");
        assert_eq!(gh_secret("My_Secret"), "${{ secrets.My_Secret }}");
        assert_eq!(gh_input("deploy-branch"), "${{ inputs.deploy-branch }}");
        assert_eq!(gh_env("Api_Key"), "${{ env.Api_Key }}");
    }

    #[test]
    fn pretty_keys() {
        let cases = [
            ("location", "Location"),
            ("server_type", "Server Type"),
            ("foo_bar_baz", "Foo Bar Baz"),
            ("", ""),
            ("Server_Type", "Server Type"),
            ("SSH_KEYS", "SSH KEYS"),
            ("Api_Key", "Api Key"),
            ("ip_range", "Ip Range"),
            ("port_8080", "Port 8080"),
            ("server_1_type", "Server 1 Type"),
            ("a", "A"),
            ("nbg1", "Nbg1"),
            ("__leading__and_trailing_", "Leading And Trailing"),
            ("ärger_über", "Ärger Über"),
        ];
        for (input, want) in cases {
            assert_eq!(pretty_key(input), want, "input: {input:?}");
        }
    }

    fn render(source: &str) -> tera::Result<String> {
        let mut tera = Tera::default();
        register(&mut tera);
        tera.add_raw_template("t", source)?;
        tera.render("t", &Context::new())
    }

    #[test]
    fn helpers_work_as_filters_and_functions() {
        assert_eq!(
            render(r#"{{ "github.ref" | gh_expression }}"#).unwrap(),
            "${{ github.ref }}"
        );
        assert_eq!(
            render(r#"{{ gh_secret(name="TOKEN") }}"#).unwrap(),
            "${{ secrets.TOKEN }}"
        );
        assert_eq!(
            render(r#"{{ "db_host" | pretty_key | upper }}"#).unwrap(),
            "DB HOST"
        );
    }

    #[test]
    fn function_rejects_wrong_arity() {
        assert!(render(r#"{{ gh_var() }}"#).is_err());
        assert!(render(r#"{{ gh_var(a="x", b="y") }}"#).is_err());
    }
}
