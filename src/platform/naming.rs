//! Artifact naming
//!
//! Every file and directory name the pipeline produces is derived here from
//! the project metadata and the platform identity.

use super::PlatformProfile;
use crate::project::ProjectMetadata;

/// Names of the artifacts built for one project on one platform
#[derive(Debug, Clone, Copy)]
pub struct ArtifactNames<'a> {
    project: &'a ProjectMetadata,
    profile: &'a PlatformProfile,
}

impl<'a> ArtifactNames<'a> {
    pub fn new(project: &'a ProjectMetadata, profile: &'a PlatformProfile) -> Self {
        Self { project, profile }
    }

    fn full_name(&self) -> String {
        format!(
            "{}-{}-{}",
            self.project.name, self.project.version, self.project.release
        )
    }

    /// The distributable disk image, e.g. `acme-1.2.3-1.osx12.dmg`
    pub fn package_file_name(&self) -> String {
        format!("{}.{}.dmg", self.full_name(), self.profile.os_identity())
    }

    /// Installer produced by the installer-generation tool
    pub fn installer_file_name(&self) -> String {
        format!("{}-installer.pkg", self.full_name())
    }

    /// Component package wrapped by the installer
    pub fn payload_file_name(&self) -> String {
        format!("{}.pkg", self.full_name())
    }

    /// Directory the project tarball is unpacked into
    pub fn staged_root_name(&self) -> String {
        format!("{}-{}", self.project.name, self.project.version)
    }

    pub fn tarball_name(&self) -> String {
        format!("{}.tar.gz", self.staged_root_name())
    }

    pub fn distribution_file_name(&self) -> String {
        format!("{}-installer.xml", self.project.name)
    }

    pub fn uninstaller_file_name(&self) -> String {
        format!("{}-uninstaller.tool", self.project.name)
    }

    /// `<os>/<version>/[<repo>/]<arch>` under `output/`.
    ///
    /// An explicit `repo` wins over the project's own repo setting.
    pub fn output_directory(&self, repo: Option<&str>) -> String {
        let repo = repo.or(self.project.repo.as_deref()).unwrap_or_default();

        [
            self.profile.os_name.as_str(),
            self.profile.os_version.as_str(),
            repo,
            self.profile.architecture.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
    }
}
