//! Editor, formatter and linter configuration.

use webkit_adapters::EmbeddedBundle;
use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::Source;
use webkit_core::error::WebkitResult;

use super::{definition_data, render};

pub const PRODUCER: Producer = Producer::new("code_style", run);

const GENERATOR: &str = "files::code_style";

const TEMPLATES: [(&str, &str); 4] = [
    (".editorconfig.tmpl", ".editorconfig"),
    (".prettierrc.tmpl", ".prettierrc"),
    (".prettierignore.tmpl", ".prettierignore"),
    ("eslint.config.js.tmpl", "eslint.config.js"),
];

fn run(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let def = input.definition()?;
    let data = definition_data(def)?;

    for (template, dst) in TEMPLATES {
        render(
            input,
            template,
            dst,
            &data,
            WriteOptions::new().with_tracking(Source::project(), GENERATOR),
        )?;
    }

    if def.contains_go() {
        input.generator().copy_from_embed(
            &EmbeddedBundle,
            ".golangci.yaml",
            ".golangci.yaml",
            WriteOptions::new().with_tracking(Source::project(), GENERATOR),
        )?;
    }
    Ok(())
}
