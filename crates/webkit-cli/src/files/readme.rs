//! Project README. Scaffolded once, then owned by the user.

use webkit_core::application::{CommandInput, Producer, RunContext, WriteOptions};
use webkit_core::domain::Source;
use webkit_core::error::WebkitResult;

use super::{definition_data, render};

pub const PRODUCER: Producer = Producer::new("readme", run);

fn run(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
    let data = definition_data(input.definition()?)?;
    render(
        input,
        "README.md.tmpl",
        "README.md",
        &data,
        WriteOptions::new()
            .with_scaffold_mode()
            .with_tracking(Source::project(), "files::readme")
            .without_notice(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::testing;
    use std::path::Path;
    use webkit_core::application::Filesystem;

    #[test]
    fn renders_app_table() {
        let (fs, manifest) = testing::run(&[PRODUCER], testing::SITE);
        let readme = fs.read_to_string("README.md").unwrap();

        assert!(readme.starts_with("# My Site\n\nMarketing site\n"));
        assert!(readme.contains("| api | go | `services/api` |"));
        assert!(manifest.get("README.md").unwrap().scaffold_mode);
    }

    #[test]
    fn existing_readme_is_left_alone() {
        let fs = webkit_adapters::MemoryFilesystem::new();
        fs.insert("README.md", "# Mine\n").unwrap();
        let input = webkit_core::application::CommandInput::builder(std::sync::Arc::new(fs.clone()))
            .definition(testing::definition(testing::SITE))
            .build();

        run(&RunContext::new(), &input).unwrap();
        assert_eq!(fs.read_file(Path::new("README.md")).unwrap(), b"# Mine\n");
    }
}
