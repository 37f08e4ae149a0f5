use crate::core::MinifyError;

/// Provides helpful suggestions for common errors
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for MinifyError {
    fn help(&self) -> Option<String> {
        match self {
            MinifyError::Build(msg) => {
                if msg.contains("not found on PATH") {
                    Some(
                        "💡 Suggestion: Install Maven and make sure 'mvn' is on your PATH, or set 'build_command' in the config file"
                            .to_string(),
                    )
                } else if msg.contains("Failed to build minified build environment") {
                    Some(
                        "💡 Suggestion: A class is probably loaded reflectively. Add it to the file passed with --additional and run again"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            MinifyError::Classpath(msg) => {
                if msg.contains("File not found") {
                    Some(
                        "💡 Suggestion: Run 'mvn dependency:resolve' in the input directory to populate the local repository"
                            .to_string(),
                    )
                } else if msg.contains("jar not found") {
                    Some(
                        "💡 Suggestion: Check that the input project builds a -SNAPSHOT jar into its target directory"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            MinifyError::Analyzer(msg) => {
                if msg.contains("not found on PATH") || msg.contains("Failed to execute:") {
                    Some(
                        "💡 Suggestion: Put the deps4j jar on the CLASSPATH, or set 'analyzer_command' in the config file"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            MinifyError::Descriptor(_) => Some(
                "💡 Suggestion: Check that the input directory contains a well-formed pom.xml"
                    .to_string(),
            ),
            MinifyError::Yaml(e) => Some(format!(
                "💡 Suggestion: Check your YAML syntax. Common issues:\n  - Missing colons after keys\n  - Incorrect indentation\n  - Unclosed quotes\n\nError details: {}",
                e
            )),
            MinifyError::Io(e) => {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    Some(
                        "💡 Suggestion: Check file permissions, or try running with appropriate permissions"
                            .to_string(),
                    )
                } else if e.kind() == std::io::ErrorKind::NotFound {
                    Some(
                        "💡 Suggestion: The file or directory may not exist. Check the path and try again"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Format an error with helpful suggestions
pub fn format_error_with_help(error: &MinifyError) -> String {
    let mut output = format!("❌ Error: {}", error);

    if let Some(help) = error.help() {
        output.push_str("\n\n");
        output.push_str(&help);
    }

    output
}
