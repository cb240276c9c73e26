//! Templates compiled into the binary.
//!
//! The project template is rooted at the Godot project directory. The Swift
//! package lives in `src/` and the built libraries are copied into `bin/`,
//! where the `.gdextension` file expects them.

use swiftgodot_core::domain::{
    ClassTemplate, DomainError, Permissions, ProjectTemplate, RelativePath, TemplateFile,
};

pub const PROJECT_TEMPLATE_NAME: &str = "builtin";

const PACKAGE_SWIFT: &str = r#"// swift-tools-version: 5.10
// The swift-tools-version declares the minimum version of Swift required to build this package.

import PackageDescription

let package = Package(
    name: "<#ProjectName#>",
    platforms: [.macOS(.v13)],
    products: [
        .library(
            name: "<#ProjectName#>",
            type: .dynamic,
            targets: ["<#ProjectName#>"]
        ),
    ],
    dependencies: [
        .package(url: "https://github.com/migueldeicaza/SwiftGodot", branch: "main"),
    ],
    targets: [
        .target(
            name: "<#ProjectName#>",
            dependencies: [
                "SwiftGodot",
            ],
            swiftSettings: [.unsafeFlags(["-suppress-warnings"])]
        ),
    ]
)
"#;

const INIT_SWIFT: &str = r#"import SwiftGodot

#initSwiftExtension(cdecl: "swift_entry_point", types: [])
"#;

const PACKAGE_GITIGNORE: &str = ".DS_Store
/.build
/Packages
xcuserdata/
DerivedData/
.swiftpm/
.netrc
";

const GODOT_GITIGNORE: &str = "# Godot 4+ specific ignores
.godot/
/android/
";

const GDEXTENSION: &str = r#"[configuration]
entry_symbol = "swift_entry_point"
compatibility_minimum = 4.2

[libraries]
macos.debug = "res://bin/lib<#ProjectName#>.dylib"
macos.release = "res://bin/lib<#ProjectName#>.dylib"
linux.debug = "res://bin/lib<#ProjectName#>.so"
linux.release = "res://bin/lib<#ProjectName#>.so"

[dependencies]
macos.debug = {"res://bin/libSwiftGodot.dylib" : ""}
macos.release = {"res://bin/libSwiftGodot.dylib" : ""}
linux.debug = {"res://bin/libSwiftGodot.so" : ""}
linux.release = {"res://bin/libSwiftGodot.so" : ""}
"#;

const PROJECT_GODOT: &str = r#"; Engine configuration file.
; It's best edited using the editor UI and not directly,
; since the parameters that go here are not all obvious.

config_version=5

[application]

config/name="<#ProjectName#>"
config/features=PackedStringArray("4.2")
"#;

const CLASS_SWIFT: &str = r#"import SwiftGodot

@Godot
class <#ClassName#>: Node {
    override func _ready() {
        GD.print("<#ClassName#> is ready")
    }
}
"#;

/// The built-in project template.
pub fn project_template() -> Result<ProjectTemplate, DomainError> {
    let mut template =
        ProjectTemplate::new(PROJECT_TEMPLATE_NAME).with_directory(RelativePath::try_new("bin")?);

    let files = [
        ("project.godot", PROJECT_GODOT),
        (".gitignore", GODOT_GITIGNORE),
        ("bin/<#ProjectName#>.gdextension", GDEXTENSION),
        ("src/Package.swift", PACKAGE_SWIFT),
        ("src/.gitignore", PACKAGE_GITIGNORE),
        ("src/Sources/<#ProjectName#>/<#ProjectName#>.swift", INIT_SWIFT),
    ];
    for (path, content) in files {
        template.add_file(TemplateFile {
            path: RelativePath::try_new(path)?,
            content: content.into(),
            permissions: Permissions::read_write(),
        });
    }

    template.validate()?;
    Ok(template)
}

/// The built-in class template.
pub fn class_template() -> ClassTemplate {
    ClassTemplate::new(CLASS_SWIFT)
}
