//! Packaging command pipeline
//!
//! The pipeline turns an unpacked project tarball into a signed (or unsigned)
//! disk image in `output/`. It is assembled from stages in a fixed order;
//! each stage is a pure function of the [`StageContext`] returning its
//! commands, and a stage whose condition does not hold returns nothing.
//!
//! Order matters: binaries are signed inside the staged root before the
//! package is built, the installer is signed before it is wrapped in the
//! disk image, and the disk image is signed before it is notarized.
//!
//! Commands are make recipe lines: `$(tempdir)` is expanded by make and
//! `$$VAR` reaches the shell as `$VAR`.

use std::fmt;

use super::naming::ArtifactNames;
use super::signing::{self, ExtraFilesSigner};
use super::PlatformProfile;
use crate::config::BuildConfig;
use crate::error::{Result, malformed};
use crate::project::ProjectMetadata;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Scaffold,
    StageInputs,
    Unpack,
    BillOfMaterialsShim,
    ExtraFileSigning,
    BinarySigning,
    Package,
    BuildInstaller,
    SignInstaller,
    Archive,
    SignArchive,
    Notarize,
    Publish,
}

impl Stage {
    pub const ALL: [Stage; 13] = [
        Stage::Scaffold,
        Stage::StageInputs,
        Stage::Unpack,
        Stage::BillOfMaterialsShim,
        Stage::ExtraFileSigning,
        Stage::BinarySigning,
        Stage::Package,
        Stage::BuildInstaller,
        Stage::SignInstaller,
        Stage::Archive,
        Stage::SignArchive,
        Stage::Notarize,
        Stage::Publish,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Scaffold => "scaffold",
            Stage::StageInputs => "stage-inputs",
            Stage::Unpack => "unpack",
            Stage::BillOfMaterialsShim => "bill-of-materials-shim",
            Stage::ExtraFileSigning => "extra-file-signing",
            Stage::BinarySigning => "binary-signing",
            Stage::Package => "package",
            Stage::BuildInstaller => "build-installer",
            Stage::SignInstaller => "sign-installer",
            Stage::Archive => "archive",
            Stage::SignArchive => "sign-archive",
            Stage::Notarize => "notarize",
            Stage::Publish => "publish",
        }
    }

    fn commands(self, ctx: &StageContext<'_>) -> Vec<String> {
        match self {
            Stage::Scaffold => scaffold(ctx),
            Stage::StageInputs => stage_inputs(ctx),
            Stage::Unpack => unpack(ctx),
            Stage::BillOfMaterialsShim => bill_of_materials_shim(ctx),
            Stage::ExtraFileSigning => extra_file_signing(ctx),
            Stage::BinarySigning => binary_signing(ctx),
            Stage::Package => package(ctx),
            Stage::BuildInstaller => build_installer(ctx),
            Stage::SignInstaller => sign_installer(ctx),
            Stage::Archive => archive(ctx),
            Stage::SignArchive => sign_archive(ctx),
            Stage::Notarize => notarize(ctx),
            Stage::Publish => publish(ctx),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a stage may look at
pub struct StageContext<'a> {
    pub profile: &'a PlatformProfile,
    pub project: &'a ProjectMetadata,
    pub config: &'a BuildConfig,
    pub names: ArtifactNames<'a>,
    pub signer: Option<&'a dyn ExtraFilesSigner>,
    /// Output repo override; falls back to the project's repo
    pub repo: Option<&'a str>,
}

impl StageContext<'_> {
    /// Platform build directory, e.g. `$(tempdir)/osx/build`
    fn build_dir(&self) -> String {
        format!("$(tempdir){}", self.build_dir_relative())
    }

    fn build_dir_relative(&self) -> String {
        format!("/{}/build", self.profile.os_name)
    }

    fn staged_root(&self) -> String {
        format!("{}/root/{}", self.build_dir(), self.names.staged_root_name())
    }

    fn dmg(&self) -> String {
        format!("{}/dmg/{}", self.build_dir(), self.names.package_file_name())
    }

    fn unlock(&self) -> String {
        signing::unlock_keychain(self.profile)
    }
}

/// Ordered packaging commands, grouped by the stage that produced them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPipeline {
    stages: Vec<(Stage, Vec<String>)>,
}

impl CommandPipeline {
    fn from_stages(stages: impl IntoIterator<Item = (Stage, Vec<String>)>) -> Self {
        Self {
            stages: stages
                .into_iter()
                .filter(|(_, commands)| !commands.is_empty())
                .collect(),
        }
    }

    /// Stages that contributed at least one command, in order
    pub fn stages(&self) -> &[(Stage, Vec<String>)] {
        &self.stages
    }

    pub fn stage(&self, stage: Stage) -> Option<&[String]> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, commands)| commands.as_slice())
    }

    pub fn contains_stage(&self, stage: Stage) -> bool {
        self.stage(stage).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stages
            .iter()
            .flat_map(|(_, commands)| commands.iter().map(String::as_str))
    }

    /// The flattened command list
    pub fn commands(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.iter().map(|(_, commands)| commands.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Display for CommandPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in self.iter() {
            writeln!(f, "{command}")?;
        }
        Ok(())
    }
}

/// Build the packaging pipeline for `project` on `profile`.
///
/// `signer` signs the project's extra files; it is only consulted when
/// signing is forced and extra files are declared. `repo` overrides the
/// output repo directory.
pub fn build_packaging_pipeline(
    profile: &PlatformProfile,
    project: &ProjectMetadata,
    config: &BuildConfig,
    signer: Option<&dyn ExtraFilesSigner>,
    repo: Option<&str>,
) -> Result<CommandPipeline> {
    project.validate()?;
    profile.validate()?;

    if config.force_signing && !project.extra_files_to_sign.is_empty() && signer.is_none() {
        return Err(malformed(
            "extra_files_to_sign",
            "extra files are declared but no signer is available",
        ));
    }

    let ctx = StageContext {
        profile,
        project,
        config,
        names: ArtifactNames::new(project, profile),
        signer,
        repo,
    };

    Ok(CommandPipeline::from_stages(
        Stage::ALL.iter().map(|stage| (*stage, stage.commands(&ctx))),
    ))
}

fn scaffold(ctx: &StageContext<'_>) -> Vec<String> {
    let build = ctx.build_dir();
    vec![
        format!("bash -c 'mkdir -p {build}/{{dmg,pkg,scripts,resources,root,payload,plugins}}'"),
        format!("mkdir -p {}", ctx.staged_root()),
        format!("mkdir -p {build}/pkg"),
    ]
}

fn stage_inputs(ctx: &StageContext<'_>) -> Vec<String> {
    let build = ctx.build_dir();
    let mut commands = vec![
        format!("cp {} {build}/", ctx.names.distribution_file_name()),
        // The uninstaller ships next to the installer in the disk image
        format!("cp {} {build}/pkg/", ctx.names.uninstaller_file_name()),
        format!("cp scripts/* {build}/scripts/"),
    ];

    let productbuild_resources = format!("resources/{}/productbuild", ctx.profile.os_name);
    if ctx.config.has_resource_dir(&productbuild_resources) {
        commands.push(format!("cp -r {productbuild_resources}/* {build}/"));
    }

    commands
}

fn unpack(ctx: &StageContext<'_>) -> Vec<String> {
    vec![format!(
        "gunzip -c {} | '{}' -C '{}' --strip-components 1 -xf -",
        ctx.names.tarball_name(),
        ctx.profile.tool("tar"),
        ctx.staged_root()
    )]
}

fn bill_of_materials_shim(ctx: &StageContext<'_>) -> Vec<String> {
    if ctx.project.bill_of_materials_present {
        return Vec::new();
    }

    let root = ctx.staged_root();
    let docdir = format!("{root}/usr/local/share/doc/{}", ctx.project.name);
    vec![
        format!("mkdir -p {docdir}"),
        format!("mv {root}/bill-of-materials {docdir}/bill-of-materials"),
    ]
}

fn extra_file_signing(ctx: &StageContext<'_>) -> Vec<String> {
    if !ctx.config.force_signing || ctx.project.extra_files_to_sign.is_empty() {
        return Vec::new();
    }

    let staged_root = format!(
        "{}/root/{}",
        ctx.build_dir_relative(),
        ctx.names.staged_root_name()
    );
    let Some(signer) = ctx.signer else {
        return Vec::new();
    };

    let mut commands = Vec::new();
    if signer.uses_keychain() {
        commands.push(ctx.unlock());
    }
    commands.extend(signer.commands(ctx.project, ctx.profile.tool("mktemp"), &staged_root));
    commands
}

fn binary_signing(ctx: &StageContext<'_>) -> Vec<String> {
    if !ctx.config.force_signing {
        return Vec::new();
    }

    let build = ctx.build_dir();
    let codesign = ctx.profile.tool("codesign");
    let targets: Vec<(String, String)> = ctx
        .profile
        .signing_targets
        .iter()
        .map(|target| target.expand(ctx.project))
        .collect();

    let sign = targets.iter().map(|(path, glob)| {
        format!(
            "find {build}/{path} -name '{glob}' -type f -exec {codesign} --timestamp --options runtime --keychain $$SIGNING_KEYCHAIN -vfs \"$$APPLICATION_SIGNING_CERT\" {{}} \\;"
        )
    });
    let verify = targets.iter().map(|(path, glob)| {
        format!(
            "find {build}/{path} -name '{glob}' -type f -exec {codesign} --verify --strict --verbose=2 {{}} \\;"
        )
    });

    std::iter::once(ctx.unlock())
        .chain(sign)
        .chain(verify)
        .collect()
}

fn package(ctx: &StageContext<'_>) -> Vec<String> {
    let build = ctx.build_dir();
    let project = ctx.project;
    vec![format!(
        "(cd {build}/; {pkgbuild} --root root/{root} --scripts {build}/scripts --identifier {identifier}.{name} --version {version} --preserve-xattr --install-location / payload/{payload})",
        pkgbuild = ctx.profile.tool("pkgbuild"),
        root = ctx.names.staged_root_name(),
        identifier = project.identifier,
        name = project.name,
        version = project.version,
        payload = ctx.names.payload_file_name(),
    )]
}

fn build_installer(ctx: &StageContext<'_>) -> Vec<String> {
    let build = ctx.build_dir();
    let project = ctx.project;
    vec![format!(
        "(cd {build}/; {productbuild} --distribution {distribution} --identifier {identifier}.{name}-installer --package-path payload/ --resources {build}/resources --plugins {build}/plugins {installer})",
        productbuild = ctx.profile.tool("productbuild"),
        distribution = ctx.names.distribution_file_name(),
        identifier = project.identifier,
        name = project.name,
        installer = ctx.names.installer_file_name(),
    )]
}

fn sign_installer(ctx: &StageContext<'_>) -> Vec<String> {
    let build = ctx.build_dir();
    let installer = ctx.names.installer_file_name();

    if !ctx.config.force_signing {
        // Unsigned: promote the installer into the disk image contents as is
        return vec![format!("mv {build}/{installer} {build}/pkg/")];
    }

    vec![
        ctx.unlock(),
        format!(
            "{} --keychain $$SIGNING_KEYCHAIN --sign \"$$INSTALLER_SIGNING_CERT\" {build}/{installer} {build}/pkg/{installer}",
            ctx.profile.tool("productsign")
        ),
        format!("rm {build}/{installer}"),
    ]
}

fn archive(ctx: &StageContext<'_>) -> Vec<String> {
    vec![format!(
        "(cd {}; {} create -volname {} -fs JHFS+ -format UDBZ -srcfolder pkg dmg/{})",
        ctx.build_dir(),
        ctx.profile.tool("hdiutil"),
        ctx.names.staged_root_name(),
        ctx.names.package_file_name()
    )]
}

fn sign_archive(ctx: &StageContext<'_>) -> Vec<String> {
    if !ctx.config.force_signing {
        return Vec::new();
    }

    let dmg = ctx.dmg();
    let codesign = ctx.profile.tool("codesign");
    vec![
        ctx.unlock(),
        format!("cd {}", ctx.build_dir()),
        format!(
            "{codesign} --timestamp --keychain $$SIGNING_KEYCHAIN --sign \"$$APPLICATION_SIGNING_CERT\" {dmg}"
        ),
        format!("{codesign} --verify --strict --verbose=2 {dmg}"),
    ]
}

fn notarize(ctx: &StageContext<'_>) -> Vec<String> {
    if !ctx.config.notarize() {
        return Vec::new();
    }

    let dmg = ctx.dmg();
    let xcrun = ctx.profile.tool("xcrun");
    vec![
        ctx.unlock(),
        format!("{xcrun} notarytool submit {dmg} --keychain-profile \"$$NOTARY_PROFILE\" --wait"),
        format!("{xcrun} stapler staple {dmg}"),
        format!(
            "{} --assess --type install --verbose {dmg}",
            ctx.profile.tool("spctl")
        ),
    ]
}

fn publish(ctx: &StageContext<'_>) -> Vec<String> {
    let target = ctx.names.output_directory(ctx.repo);
    vec![
        format!("mkdir -p output/{target}"),
        format!(
            "cp {}/dmg/{} ./output/{target}",
            ctx.build_dir(),
            ctx.names.package_file_name()
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PacksmithError;
    use crate::platform::signing::{LocalSigner, RemoteSigner, SigningTarget};
    use crate::project::SigningHost;
    use crate::test_fixtures::create_temp_dir;

    fn profile() -> PlatformProfile {
        PlatformProfile::from_identifier("osx-12-x86_64").unwrap()
    }

    fn project() -> ProjectMetadata {
        ProjectMetadata::new("acme", "1.2.3", "1", "com.example")
    }

    fn unsigned_config() -> BuildConfig {
        BuildConfig::new("/nonexistent/packsmith/resources")
    }

    fn signing_config() -> BuildConfig {
        unsigned_config().with_force_signing(true)
    }

    fn build(project: &ProjectMetadata, config: &BuildConfig) -> CommandPipeline {
        let profile = profile();
        let signer = LocalSigner::new(&profile);
        build_packaging_pipeline(&profile, project, config, Some(&signer), None).unwrap()
    }

    fn is_signing_command(command: &str) -> bool {
        ["codesign", "productsign", "notarytool", "stapler", "spctl", "unlock-keychain"]
            .iter()
            .any(|needle| command.contains(needle))
    }

    fn position(pipeline: &CommandPipeline, needle: &str) -> usize {
        pipeline
            .iter()
            .position(|c| c.contains(needle))
            .unwrap_or_else(|| panic!("no command contains '{needle}'"))
    }

    #[test]
    fn test_unsigned_pipeline_has_no_signing() {
        let pipeline = build(&project(), &unsigned_config());

        assert_eq!(pipeline.iter().filter(|c| is_signing_command(c)).count(), 0);
        let promotions: Vec<&str> = pipeline
            .iter()
            .filter(|c| c.starts_with("mv ") && c.ends_with("-installer.pkg $(tempdir)/osx/build/pkg/"))
            .collect();
        assert_eq!(
            promotions,
            vec!["mv $(tempdir)/osx/build/acme-1.2.3-1-installer.pkg $(tempdir)/osx/build/pkg/"]
        );
        assert!(!pipeline.contains_stage(Stage::BinarySigning));
        assert!(!pipeline.contains_stage(Stage::SignArchive));
        assert!(!pipeline.contains_stage(Stage::Notarize));
    }

    #[test]
    fn test_unsigned_pipeline_stage_order() {
        let pipeline = build(&project(), &unsigned_config());
        let stages: Vec<Stage> = pipeline.stages().iter().map(|(s, _)| *s).collect();
        assert_eq!(
            stages,
            vec![
                Stage::Scaffold,
                Stage::StageInputs,
                Stage::Unpack,
                Stage::BillOfMaterialsShim,
                Stage::Package,
                Stage::BuildInstaller,
                Stage::SignInstaller,
                Stage::Archive,
                Stage::Publish,
            ]
        );
    }

    #[test]
    fn test_signing_counts_and_order() {
        let project = project()
            .with_local_signing(true)
            .with_extra_file_to_sign("usr/local/bin/acme")
            .with_extra_file_to_sign("usr/local/bin/acme-helper");
        let pipeline = build(&project, &signing_config());

        let table_len = profile().signing_targets.len();
        let package_at = position(&pipeline, "pkgbuild");

        let signing: Vec<usize> = pipeline
            .iter()
            .enumerate()
            .filter(|(_, c)| c.contains("-vfs"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(signing.len(), table_len + 2);
        assert!(signing.iter().all(|i| *i < package_at));

        let verifications = pipeline
            .iter()
            .filter(|c| c.starts_with("find ") && c.contains("--verify"))
            .count();
        assert_eq!(verifications, table_len);

        assert_eq!(pipeline.iter().filter(|c| c.contains("pkgbuild")).count(), 1);

        let first_unlock = position(&pipeline, "unlock-keychain");
        let first_codesign = position(&pipeline, "codesign");
        assert!(first_unlock < first_codesign);
        assert_eq!(
            pipeline.stage(Stage::ExtraFileSigning).unwrap()[0],
            "security unlock-keychain -p $$SIGNING_KEYCHAIN_PW $$SIGNING_KEYCHAIN"
        );
    }

    #[test]
    fn test_signing_stages_follow_their_artifacts() {
        let pipeline = build(&project(), &signing_config());

        let package_at = position(&pipeline, "pkgbuild");
        let installer_at = position(&pipeline, "productbuild");
        let productsign_at = position(&pipeline, "productsign");
        let archive_at = position(&pipeline, "hdiutil");
        let sign_dmg_at = position(&pipeline, "--sign \"$$APPLICATION_SIGNING_CERT\"");
        let notarize_at = position(&pipeline, "notarytool");
        let staple_at = position(&pipeline, "stapler staple");
        let assess_at = position(&pipeline, "spctl --assess");
        let publish_at = position(&pipeline, "./output/");

        assert!(package_at < installer_at);
        assert!(installer_at < productsign_at);
        assert!(productsign_at < archive_at);
        assert!(archive_at < sign_dmg_at);
        assert!(sign_dmg_at < notarize_at);
        assert!(notarize_at < staple_at);
        assert!(staple_at < assess_at);
        assert!(assess_at < publish_at);

        assert!(!pipeline.iter().any(|c| c.starts_with("mv ") && c.contains("-installer.pkg")));
        assert!(pipeline
            .iter()
            .any(|c| c == "rm $(tempdir)/osx/build/acme-1.2.3-1-installer.pkg"));
    }

    #[test]
    fn test_no_extra_files_means_no_extra_signing() {
        let pipeline = build(&project(), &signing_config());
        assert!(!pipeline.contains_stage(Stage::ExtraFileSigning));
        assert!(pipeline.contains_stage(Stage::BinarySigning));
    }

    #[test]
    fn test_extra_files_ignored_without_force_signing() {
        let project = project()
            .with_local_signing(true)
            .with_extra_file_to_sign("usr/local/bin/acme");
        let pipeline = build(&project, &unsigned_config());
        assert!(!pipeline.contains_stage(Stage::ExtraFileSigning));
    }

    #[test]
    fn test_remote_extra_files_without_host_build_unsigned() {
        let profile = profile();
        let project = project().with_extra_file_to_sign("usr/local/bin/acme");
        let signer = signing::signer_for(&project, &profile);
        assert!(signer.is_none());

        let pipeline =
            build_packaging_pipeline(&profile, &project, &unsigned_config(), signer.as_deref(), None)
                .unwrap();
        assert!(!pipeline.contains_stage(Stage::ExtraFileSigning));
        assert!(!pipeline.iter().any(|c| is_signing_command(c)));
    }

    #[test]
    fn test_remote_extra_files_skip_keychain_unlock() {
        let profile = profile();
        let signer = RemoteSigner::new(SigningHost {
            hostname: "signer.example.com".to_string(),
            username: "builder".to_string(),
            command: "/usr/local/bin/sign".to_string(),
        });
        let project = project().with_extra_file_to_sign("usr/local/bin/acme");
        let pipeline =
            build_packaging_pipeline(&profile, &project, &signing_config(), Some(&signer), None)
                .unwrap();

        let extra = pipeline.stage(Stage::ExtraFileSigning).unwrap();
        assert_eq!(extra.len(), 1);
        assert!(extra[0].starts_with("tmp=$$(ssh builder@signer.example.com"));
    }

    #[test]
    fn test_skip_notarization() {
        let config = signing_config().with_skip_notarization(true);
        let pipeline = build(&project(), &config);

        assert!(pipeline.contains_stage(Stage::SignArchive));
        assert!(!pipeline.contains_stage(Stage::Notarize));
        assert!(!pipeline.iter().any(|c| c.contains("notarytool")));
    }

    #[test]
    fn test_bill_of_materials_shim_iff_absent() {
        let without = build(&project(), &unsigned_config());
        assert_eq!(
            without.stage(Stage::BillOfMaterialsShim).unwrap(),
            &[
                "mkdir -p $(tempdir)/osx/build/root/acme-1.2.3/usr/local/share/doc/acme".to_string(),
                "mv $(tempdir)/osx/build/root/acme-1.2.3/bill-of-materials $(tempdir)/osx/build/root/acme-1.2.3/usr/local/share/doc/acme/bill-of-materials".to_string(),
            ]
        );

        let with = build(&project().with_bill_of_materials(true), &unsigned_config());
        assert!(!with.contains_stage(Stage::BillOfMaterialsShim));
        assert!(!with.iter().any(|c| c.contains("bill-of-materials")));
    }

    #[test]
    fn test_publish_copies_named_dmg() {
        let pipeline = build(&project(), &unsigned_config());
        assert_eq!(
            pipeline.stage(Stage::Publish).unwrap(),
            &[
                "mkdir -p output/osx/12/x86_64".to_string(),
                "cp $(tempdir)/osx/build/dmg/acme-1.2.3-1.osx12.dmg ./output/osx/12/x86_64".to_string(),
            ]
        );
    }

    #[test]
    fn test_publish_honors_repo_override() {
        let profile = profile();
        let pipeline =
            build_packaging_pipeline(&profile, &project(), &unsigned_config(), None, Some("stable"))
                .unwrap();
        assert!(pipeline
            .iter()
            .any(|c| c == "mkdir -p output/osx/12/stable/x86_64"));
    }

    #[test]
    fn test_unpack_and_package_commands() {
        let pipeline = build(&project(), &unsigned_config());
        assert_eq!(
            pipeline.stage(Stage::Unpack).unwrap(),
            &["gunzip -c acme-1.2.3.tar.gz | 'tar' -C '$(tempdir)/osx/build/root/acme-1.2.3' --strip-components 1 -xf -".to_string()]
        );
        assert_eq!(
            pipeline.stage(Stage::Package).unwrap(),
            &["(cd $(tempdir)/osx/build/; /usr/bin/pkgbuild --root root/acme-1.2.3 --scripts $(tempdir)/osx/build/scripts --identifier com.example.acme --version 1.2.3 --preserve-xattr --install-location / payload/acme-1.2.3-1.pkg)".to_string()]
        );
    }

    #[test]
    fn test_scaffold_is_first() {
        let pipeline = build(&project(), &unsigned_config());
        let commands = pipeline.commands();
        assert_eq!(
            commands[0],
            "bash -c 'mkdir -p $(tempdir)/osx/build/{dmg,pkg,scripts,resources,root,payload,plugins}'"
        );
        assert_eq!(commands[1], "mkdir -p $(tempdir)/osx/build/root/acme-1.2.3");
    }

    #[test]
    fn test_productbuild_resources_checked_at_build_time() {
        let without = build(&project(), &unsigned_config());
        assert_eq!(without.stage(Stage::StageInputs).unwrap().len(), 3);

        let temp = create_temp_dir();
        std::fs::create_dir_all(temp.path().join("resources/osx/productbuild")).unwrap();
        let config = BuildConfig::new(temp.path());
        let with = build(&project(), &config);
        let inputs = with.stage(Stage::StageInputs).unwrap();
        assert_eq!(inputs.len(), 4);
        assert_eq!(
            inputs[3],
            "cp -r resources/osx/productbuild/* $(tempdir)/osx/build/"
        );
    }

    #[test]
    fn test_custom_signing_table() {
        let profile = profile().with_signing_targets(vec![SigningTarget::new(
            "root/{root}/Applications/Acme.app/Contents/MacOS/",
            "*",
        )]);
        let signer = LocalSigner::new(&profile);
        let pipeline = build_packaging_pipeline(
            &profile,
            &project(),
            &signing_config(),
            Some(&signer),
            None,
        )
        .unwrap();

        assert_eq!(
            pipeline.stage(Stage::BinarySigning).unwrap().len(),
            3,
            "unlock + one sign + one verify"
        );
    }

    #[test]
    fn test_tool_overrides_flow_into_commands() {
        let profile = profile().with_tool("tar", "/usr/local/bin/gtar");
        let pipeline =
            build_packaging_pipeline(&profile, &project(), &unsigned_config(), None, None).unwrap();
        assert!(pipeline.stage(Stage::Unpack).unwrap()[0].contains("'/usr/local/bin/gtar'"));
    }

    #[test]
    fn test_malformed_metadata_is_rejected() {
        let profile = profile();
        let project = ProjectMetadata::new("acme", "", "1", "com.example");
        let err = build_packaging_pipeline(&profile, &project, &unsigned_config(), None, None)
            .unwrap_err();
        assert!(matches!(err, PacksmithError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_forced_signing_of_extra_files_needs_signer() {
        let profile = profile();
        let project = project()
            .with_local_signing(true)
            .with_extra_file_to_sign("usr/local/bin/acme");
        let err = build_packaging_pipeline(&profile, &project, &signing_config(), None, None)
            .unwrap_err();
        assert!(matches!(err, PacksmithError::MalformedMetadata { .. }));
    }

    #[test]
    fn test_display_is_one_command_per_line() {
        let pipeline = build(&project(), &unsigned_config());
        let rendered = pipeline.to_string();
        assert_eq!(rendered.lines().count(), pipeline.len());
        assert!(!pipeline.is_empty());
    }
}
