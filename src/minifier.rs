//! The minification pipeline.
//!
//! Stages run strictly in sequence and the first failure aborts the run:
//! build the input, read `pom.xml`, assemble the classpath, ask the analyzer
//! for the retained classes, prepare the output, copy, prune property files
//! and optionally build the output to verify it.

use crate::analyzer::{AnalysisRequest, DependencyAnalyzer, MinDepsAnalyzer, RetainedClasses};
use crate::build::{MavenBuilder, ProjectBuilder};
use crate::classpath::{Classpath, ClasspathAssembler};
use crate::config::Config;
use crate::core::{BuildDescriptor, MinifyError, MinifyResult};
use crate::options::RunConfiguration;
use crate::output::{CopyReport, Copier, OutputPreparer};
use crate::properties::{PatchOutcome, PropertyPatcher};

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct MinifySummary {
    pub classpath: Classpath,
    pub retained: RetainedClasses,
    pub copy: CopyReport,
    pub patched: Vec<PatchOutcome>,
    /// Whether the output was rebuilt successfully
    pub verified: bool,
}

pub struct Minifier {
    run: RunConfiguration,
    config: Config,
    builder: Box<dyn ProjectBuilder>,
    analyzer: Box<dyn DependencyAnalyzer>,
}

impl Minifier {
    /// Create a minifier using Maven and MinDeps as configured
    pub fn new(run: RunConfiguration, config: Config) -> Self {
        let builder = Box::new(MavenBuilder::new(config.build_command.clone()));
        let analyzer = Box::new(MinDepsAnalyzer::new(config.analyzer_command.clone()));
        Self {
            run,
            config,
            builder,
            analyzer,
        }
    }

    /// Replace the project builder
    pub fn with_builder(mut self, builder: Box<dyn ProjectBuilder>) -> Self {
        self.builder = builder;
        self
    }

    /// Replace the dependency analyzer
    pub fn with_analyzer(mut self, analyzer: Box<dyn DependencyAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Run the whole pipeline
    pub fn execute(&self) -> MinifyResult<MinifySummary> {
        let input = &self.run.input;
        let output = &self.run.output;

        self.builder.build(input).map_err(|e| {
            MinifyError::Build(format!("Failed to build input build environment: {}", e))
        })?;

        let descriptor = BuildDescriptor::load(input)?;

        let assembler = ClasspathAssembler::new(self.config.get_maven_repository()?);
        let classpath = assembler.assemble(&descriptor, input)?;

        let retained = self.determine_classes(&classpath)?;

        OutputPreparer::new(input, output, &self.config).prepare()?;

        let copy = Copier::new(input, output).copy(&retained)?;

        let patched =
            PropertyPatcher::new(output, &self.config.property_files).patch(&retained)?;

        let verified = if self.run.verify {
            tracing::info!("Testing minified build environment...");
            self.builder.build(output).map_err(|e| {
                MinifyError::Build(format!("Failed to build minified build environment: {}", e))
            })?;
            true
        } else {
            false
        };

        Ok(MinifySummary {
            classpath,
            retained,
            copy,
            patched,
            verified,
        })
    }

    fn determine_classes(&self, classpath: &Classpath) -> MinifyResult<RetainedClasses> {
        tracing::info!("Determining minimal set of classes...");

        let request = AnalysisRequest {
            java_home: self.run.java_home.clone(),
            classpath: classpath.clone(),
            packages: self.run.packages.clone(),
            classes_file: self.run.classes_file.clone(),
            additional_file: self.run.additional_file.clone(),
        };

        self.analyzer
            .retained_classes(&request)
            .map_err(|e| MinifyError::Analyzer(format!("Failed to execute MinDeps: {}", e)))
    }
}
