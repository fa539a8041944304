//! Static packaging inputs
//!
//! Before the pipeline runs, the working directory needs the installer
//! distribution descriptor, the pre/postinstall scripts, the uninstaller and
//! any platform resources shipped with the project. Templated files go
//! through a [`TemplateRenderer`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::PlatformProfile;
use super::naming::ArtifactNames;
use crate::error::{PacksmithError, Result};
use crate::project::ProjectMetadata;

/// Variables available to templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn for_project(project: &ProjectMetadata, profile: &PlatformProfile) -> Self {
        let names = ArtifactNames::new(project, profile);
        let mut ctx = Self::default();
        ctx.insert("name", &project.name);
        ctx.insert("version", &project.version);
        ctx.insert("release", &project.release);
        ctx.insert("identifier", &project.identifier);
        ctx.insert("os_name", &profile.os_name);
        ctx.insert("os_version", &profile.os_version);
        ctx.insert("architecture", &profile.architecture);
        ctx.insert("payload", names.payload_file_name());
        ctx.insert("installer", names.installer_file_name());
        ctx
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Renders a named template with a variable context
pub trait TemplateRenderer {
    fn render(&self, template: &str, context: &TemplateContext) -> Result<String>;
}

/// Reads templates from a directory and substitutes `{{var}}` markers.
///
/// Unknown markers are left in place.
#[derive(Debug, Clone)]
pub struct DirectoryRenderer {
    root: PathBuf,
}

impl DirectoryRenderer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateRenderer for DirectoryRenderer {
    fn render(&self, template: &str, context: &TemplateContext) -> Result<String> {
        let path = self.root.join(template);
        let mut content =
            fs::read_to_string(&path).map_err(|e| PacksmithError::TemplateFailed {
                template: path.display().to_string(),
                reason: e.to_string(),
            })?;

        for (key, value) in context.iter() {
            content = content.replace(&format!("{{{{{key}}}}}"), value);
        }
        Ok(content)
    }
}

/// Template names, relative to the renderer root
fn installer_template(os: &str) -> String {
    format!("{os}/project-installer.xml")
}

fn script_template(os: &str, script: &str) -> String {
    format!("{os}/{script}")
}

fn uninstaller_template(os: &str) -> String {
    format!("{os}/uninstaller.tool")
}

const INSTALL_SCRIPTS: &[&str] = &["preinstall", "postinstall"];

/// Write the static inputs the pipeline's staging stage copies from.
///
/// `resources_root` is where the project keeps its own `resources/<os>/`
/// tree; it is copied into `workdir/resources/<os>/` when present.
pub fn stage_packaging_artifacts(
    workdir: &Path,
    project: &ProjectMetadata,
    profile: &PlatformProfile,
    renderer: &dyn TemplateRenderer,
    resources_root: &Path,
) -> Result<()> {
    let os = profile.os_name.as_str();
    let names = ArtifactNames::new(project, profile);
    let context = TemplateContext::for_project(project, profile);

    let resources_dir = workdir.join("resources").join(os);
    let scripts_dir = workdir.join("scripts");
    fs::create_dir_all(&resources_dir)?;
    fs::create_dir_all(&scripts_dir)?;

    let distribution = renderer.render(&installer_template(os), &context)?;
    fs::write(workdir.join(names.distribution_file_name()), distribution)?;

    for script in INSTALL_SCRIPTS {
        let path = scripts_dir.join(script);
        fs::write(&path, renderer.render(&script_template(os, script), &context)?)?;
        make_executable(&path)?;
    }

    let uninstaller = workdir.join(names.uninstaller_file_name());
    fs::write(&uninstaller, renderer.render(&uninstaller_template(os), &context)?)?;
    make_executable(&uninstaller)?;

    let project_resources = resources_root.join("resources").join(os);
    if project_resources.is_dir() {
        copy_tree(&project_resources, &resources_dir)?;
    }

    Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).min_depth(1) {
        let entry = entry.map_err(|e| PacksmithError::IoError {
            message: e.to_string(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| PacksmithError::IoError {
                message: e.to_string(),
            })?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            debug!("Copying {} to {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
