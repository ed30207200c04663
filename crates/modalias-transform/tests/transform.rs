//! End-to-end tests: raw options + source text in, rewritten source out.

use modalias_config::{ConfigError, Environment, PluginOptions, normalize};
use modalias_transform::{Resolver, SpecifierKind, TransformError, Transformer, transform_source};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn list_options() -> Value {
    json!([
        { "src": "./src/mylib/subfolder/utils", "expose": "utils" },
        { "src": "./src/mylib/subfolder/utils2", "expose": "myapp/utils2" }
    ])
}

fn transform(code: &str, options: &Value) -> String {
    let env = Environment::new("/project");
    transform_source(code, Path::new("./index.js"), options, &env)
        .unwrap()
        .code
}

mod known_path {
    use super::*;

    #[test]
    fn require_exposed_name() {
        assert_eq!(
            transform(r#"var utils = require("utils");"#, &list_options()),
            r#"var utils = require("./src/mylib/subfolder/utils");"#
        );
    }

    #[test]
    fn import_exposed_name() {
        assert_eq!(
            transform(r#"import utils from "utils";"#, &list_options()),
            r#"import utils from "./src/mylib/subfolder/utils";"#
        );
    }

    #[test]
    fn require_exposed_full_path() {
        assert_eq!(
            transform(r#"var utils = require("myapp/utils2");"#, &list_options()),
            r#"var utils = require("./src/mylib/subfolder/utils2");"#
        );
    }

    #[test]
    fn import_exposed_full_path() {
        assert_eq!(
            transform(r#"import utils from "myapp/utils2";"#, &list_options()),
            r#"import utils from "./src/mylib/subfolder/utils2";"#
        );
    }

    #[test]
    fn require_sub_file() {
        assert_eq!(
            transform(r#"var myUtil = require("utils/my-util-file");"#, &list_options()),
            r#"var myUtil = require("./src/mylib/subfolder/utils/my-util-file");"#
        );
    }

    #[test]
    fn import_sub_file() {
        assert_eq!(
            transform(r#"import myUtil from "utils/my-util-file";"#, &list_options()),
            r#"import myUtil from "./src/mylib/subfolder/utils/my-util-file";"#
        );
    }
}

mod unknown_path {
    use super::*;

    #[test]
    fn require_is_untouched() {
        let code = r#"var otherLib = require("other-lib");"#;
        assert_eq!(transform(code, &list_options()), code);
    }

    #[test]
    fn import_is_untouched() {
        let code = r#"import otherLib from "other-lib";"#;
        assert_eq!(transform(code, &list_options()), code);
    }

    #[test]
    fn relative_specifiers_are_never_aliased() {
        // A catch-all alias would match anything bare
        let options = json!({ "alias": { "": "./vendor" } });
        let code = r#"import a from "./utils"; import b from "/abs/utils";"#;
        assert_eq!(transform(code, &options), code);
    }
}

#[test]
fn pattern_alias_is_relativized() {
    let options = json!({ "alias": { "^my-alias/(.*)": "./src/\\1" } });
    assert_eq!(
        transform(r#"require("my-alias/widgets/button");"#, &options),
        r#"require("./src/widgets/button");"#
    );
}

#[test]
fn npm_alias_becomes_package_name() {
    let options = json!({ "alias": { "utils": "npm:lodash" } });
    assert_eq!(
        transform(r#"const _ = require("utils");"#, &options),
        r#"const _ = require("lodash");"#
    );
}

#[test]
fn preserves_everything_but_the_specifier() {
    let code = "// header\nimport { a, b as c } from 'utils/x'; /* keep */\nexport { d } from \"myapp/utils2\";\nconst e = require.resolve('utils', { paths: [] });\n";
    let expected = "// header\nimport { a, b as c } from './src/mylib/subfolder/utils/x'; /* keep */\nexport { d } from \"./src/mylib/subfolder/utils2\";\nconst e = require.resolve('./src/mylib/subfolder/utils', { paths: [] });\n";
    assert_eq!(transform(code, &list_options()), expected);
}

#[test]
fn dynamic_import_and_export_all() {
    assert_eq!(
        transform(
            r#"export * from "utils"; const m = import("utils/lazy");"#,
            &list_options()
        ),
        r#"export * from "./src/mylib/subfolder/utils"; const m = import("./src/mylib/subfolder/utils/lazy");"#
    );
}

#[test]
fn concatenation_and_template_heads() {
    assert_eq!(
        transform(r#"require("utils/" + name);"#, &list_options()),
        r#"require("./src/mylib/subfolder/utils/" + name);"#
    );
    assert_eq!(
        transform("require(`utils/${name}`);", &list_options()),
        "require(`./src/mylib/subfolder/utils/${name}`);"
    );
}

#[test]
fn rewrites_are_reported_in_order() {
    let env = Environment::new("/project");
    let output = transform_source(
        r#"import a from "utils"; const b = require("lodash"); const c = require("myapp/utils2");"#,
        Path::new("./index.js"),
        &list_options(),
        &env,
    )
    .unwrap();

    assert!(output.changed());
    let summary: Vec<_> = output
        .rewrites
        .iter()
        .map(|r| (r.kind, r.original.as_str(), r.replacement.as_str()))
        .collect();
    assert_eq!(
        summary,
        [
            (SpecifierKind::Import, "utils", "./src/mylib/subfolder/utils"),
            (SpecifierKind::Require, "myapp/utils2", "./src/mylib/subfolder/utils2"),
        ]
    );
}

#[test]
fn nested_file_gets_parent_relative_paths() {
    let env = Environment::new("/project");
    let output = transform_source(
        r#"import u from "utils/a";"#,
        Path::new("/project/src/pages/home.jsx"),
        &list_options(),
        &env,
    )
    .unwrap();
    assert_eq!(output.code, r#"import u from "../mylib/subfolder/utils/a";"#);
}

#[test]
fn typescript_sources_are_parsed() {
    let env = Environment::new("/project");
    let output = transform_source(
        "import type { T } from 'utils';\nconst x: T = require('utils/v') as T;\n",
        Path::new("./index.ts"),
        &list_options(),
        &env,
    )
    .unwrap();
    assert_eq!(
        output.code,
        "import type { T } from './src/mylib/subfolder/utils';\nconst x: T = require('./src/mylib/subfolder/utils/v') as T;\n"
    );
}

#[test]
fn project_config_cwd_anchors_targets() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("app");
    fs::create_dir_all(app.join("src/components")).unwrap();
    fs::write(app.join(".babelrc"), "{}").unwrap();

    let env = Environment::new(temp.path());
    let output = transform_source(
        r#"import Button from "components/Button";"#,
        &app.join("src/index.js"),
        &json!({ "cwd": "fromProjectConfig", "alias": { "components": "./src/components" } }),
        &env,
    )
    .unwrap();
    assert_eq!(output.code, r#"import Button from "./components/Button";"#);
}

#[test]
fn jsx_in_javascript_files() {
    let options = json!([{ "src": "./src/utils", "expose": "utils" }]);
    assert_eq!(
        transform(r#"import a from "utils"; const x = <div/>;"#, &options),
        r#"import a from "./src/utils"; const x = <div/>;"#
    );

    let env = Environment::new("/project");
    let output = transform_source(
        "const View = () => <main>{require('utils/view')}</main>;\n",
        Path::new("./legacy.es6"),
        &options,
        &env,
    )
    .unwrap();
    assert_eq!(
        output.code,
        "const View = () => <main>{require('./src/utils/view')}</main>;\n"
    );
}

#[test]
fn transformer_reuses_one_resolver_across_files() {
    let env = Environment::new("/project");
    let options = PluginOptions::from_value(&list_options()).unwrap();
    let config = normalize(&options, None, &env).unwrap();
    let transformer = Transformer::new(Resolver::from_config(&config, &env).unwrap());
    assert_eq!(transformer.resolver().table().len(), 2);

    let top = transformer
        .transform(r#"import u from "utils";"#, Path::new("/project/index.js"))
        .unwrap();
    let nested = transformer
        .transform(r#"import u from "utils";"#, Path::new("/project/src/app.js"))
        .unwrap();
    assert_eq!(top.code, r#"import u from "./src/mylib/subfolder/utils";"#);
    assert_eq!(nested.code, r#"import u from "./mylib/subfolder/utils";"#);
}

#[test]
fn malformed_options_abort_the_file() {
    let env = Environment::new("/project");
    let err = transform_source(
        r#"require("utils");"#,
        Path::new("./index.js"),
        &json!({ "alias": { "utils": ["not", "a", "string"] } }),
        &env,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        TransformError::Config(ConfigError::NotAString { ref key, .. }) if key == "utils"
    ));
}

#[test]
fn invalid_pattern_aborts_the_file() {
    let env = Environment::new("/project");
    let err = transform_source(
        r#"require("utils");"#,
        Path::new("./index.js"),
        &json!({ "alias": { "^(broken": "./x" } }),
        &env,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        TransformError::Config(ConfigError::InvalidPattern { .. })
    ));
}

#[test]
fn syntax_errors_are_reported() {
    let env = Environment::new("/project");
    let err = transform_source(
        "import { from",
        Path::new("./broken.js"),
        &list_options(),
        &env,
    )
    .unwrap_err();
    assert!(matches!(err, TransformError::Parse { .. }));
}

#[test]
fn unchanged_file_reports_no_rewrites() {
    let env = Environment::new("/project");
    let code = "const fs = require('fs');\n";
    let output =
        transform_source(code, Path::new("./index.js"), &list_options(), &env).unwrap();
    assert!(!output.changed());
    assert_eq!(output.code, code);
}
