//! Text templates.
//!
//! `SyntaxTemplate` is the seam between plan structure and target syntax.
//! `RxTemplate` renders System.Reactive-style text:
//!
//! ```text
//! Observable.Create<Child>(observer => { .. })          // link 1
//!     .Select(x => Observable.Create<int>(observer => { .. }))
//!     .Switch()                                         // link 2, rebound
//! ```

use crate::config::RenderConfig;
use crate::view::{AccessorView, ChainView, CombinatorView, ContainerView, HopView, PositionView, TableView};
use crate::writer::SourceWriter;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use propwatch_analysis::DestinationSurface;

/// Hooks a renderer calls to produce artifact text.
///
/// `lead` is prepended to the first line of an expression and `trail`
/// appended to its last line, so expressions can be embedded in statements.
pub trait SyntaxTemplate {
    /// Banner and imports at the top of every artifact.
    fn file_prelude(&self, w: &mut SourceWriter, config: &RenderConfig);

    /// Observes one member of `source`.
    fn member_observation(
        &self,
        w: &mut SourceWriter,
        lead: &str,
        source: &str,
        hop: &HopView,
        trail: &str,
    );

    /// Continues a chain by one hop, rebinding on every upstream emission.
    fn rebind_step(&self, w: &mut SourceWriter, hop: &HopView, trail: &str);

    /// Observes a whole chain rooted at `source`.
    fn chain_expression(
        &self,
        w: &mut SourceWriter,
        lead: &str,
        source: &str,
        chain: &ChainView,
        trail: &str,
    ) {
        let Some((first, rest)) = chain.hops.split_first() else {
            return;
        };
        if rest.is_empty() {
            self.member_observation(w, lead, source, first, trail);
            return;
        }

        self.member_observation(w, lead, source, first, "");
        w.indent();
        for (i, hop) in rest.iter().enumerate() {
            let last = i + 1 == rest.len();
            self.rebind_step(w, hop, if last { trail } else { "" });
        }
        w.dedent();
    }

    /// An accessor observing exactly one chain.
    fn single_accessor(
        &self,
        w: &mut SourceWriter,
        config: &RenderConfig,
        accessor: &AccessorView,
        chain: &ChainView,
    );

    /// A lookup table from raw key to subscription factory.
    fn dispatch_table(&self, w: &mut SourceWriter, table: &TableView);

    /// An accessor selecting a factory from `table_name` by expression text.
    fn dispatch_accessor(
        &self,
        w: &mut SourceWriter,
        config: &RenderConfig,
        accessor: &AccessorView,
        table_name: &str,
    );

    /// An accessor combining several chains.
    fn combinator_method(&self, w: &mut SourceWriter, config: &RenderConfig, view: &CombinatorView);

    fn open_extension_container(&self, w: &mut SourceWriter, config: &RenderConfig);

    fn close_extension_container(&self, w: &mut SourceWriter);

    /// Opens the namespace, every enclosing type and the root type.
    fn open_partial_type(&self, w: &mut SourceWriter, container: &ContainerView);

    fn close_partial_type(&self, w: &mut SourceWriter, container: &ContainerView);

    /// Declares every accessor shape in the extension container with a body
    /// that throws, so call sites bind before any artifact exists.
    fn stub_container(&self, w: &mut SourceWriter, config: &RenderConfig);

    fn stub_file_name(&self, config: &RenderConfig) -> String;

    /// File name of the `ordinal`-th artifact of a surface kind.
    fn artifact_file_name(
        &self,
        config: &RenderConfig,
        root_name: &str,
        surface: DestinationSurface,
        ordinal: usize,
    ) -> String;
}

const USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.ComponentModel",
    "System.Linq.Expressions",
    "System.Reactive.Disposables",
    "System.Reactive.Linq",
    "System.Runtime.CompilerServices",
];

/// Escapes text for a C# string literal.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Template producing System.Reactive extension and partial-class text.
#[derive(Clone, Copy, Debug, Default)]
pub struct RxTemplate;

impl RxTemplate {
    fn source_name(surface: DestinationSurface, public_name: &'static str) -> &'static str {
        match surface {
            DestinationSurface::Public => public_name,
            DestinationSurface::ScopeInjected => "this",
        }
    }

    /// Writes the declaration line and parameter list of an accessor.
    fn accessor_head(
        w: &mut SourceWriter,
        config: &RenderConfig,
        accessor: &AccessorView,
        output: &str,
        receiver: &str,
        params: &[String],
    ) {
        let modifiers = match accessor.surface {
            DestinationSurface::Public => format!("{} static", accessor.access.keywords()),
            DestinationSurface::ScopeInjected => String::from(accessor.access.keywords()),
        };
        w.line(format!(
            "{} IObservable<{}> {}(",
            modifiers, output, config.method_name
        ));
        w.indent();
        if accessor.surface == DestinationSurface::Public {
            w.line(format!("this {} {},", accessor.root, receiver));
        }
        for param in params {
            w.line(format!("{},", param));
        }
        w.line("[CallerMemberName] string callerMemberName = null,");
        w.line("[CallerFilePath] string callerFilePath = null,");
        w.line("[CallerLineNumber] int callerLineNumber = 0)");
        w.dedent();
    }

    fn expression_param(root: &str, result: &str, name: &str) -> String {
        format!("Expression<Func<{}, {}>> {}", root, result, name)
    }

    /// One generic overload of the stub; `arity` 1 is the single-chain shape.
    fn stub_overload(w: &mut SourceWriter, config: &RenderConfig, arity: usize) {
        let temps: Vec<String> = if arity == 1 {
            vec![String::from("TReturn")]
        } else {
            (1..=arity).map(|n| format!("TTempReturn{}", n)).collect()
        };

        let mut generics = vec![String::from("TObj")];
        generics.extend(temps.iter().cloned());
        if arity > 1 {
            generics.push("TReturn".into());
        }

        w.line(format!(
            "public static IObservable<TReturn> {}<{}>(",
            config.method_name,
            generics.join(", ")
        ));
        w.indent();
        w.line("this TObj objectToMonitor,");
        if arity == 1 {
            w.line(format!("{},", Self::expression_param("TObj", "TReturn", "propertyExpression")));
        } else {
            for (i, temp) in temps.iter().enumerate() {
                let name = format!("propertyExpression{}", i + 1);
                w.line(format!("{},", Self::expression_param("TObj", temp, &name)));
            }
            w.line(format!("Func<{}, TReturn> conversionFunc,", temps.join(", ")));
        }
        w.line("[CallerMemberName] string callerMemberName = null,");
        w.line("[CallerFilePath] string callerFilePath = null,");
        w.line("[CallerLineNumber] int callerLineNumber = 0)");
        w.line("where TObj : INotifyPropertyChanged");
        w.dedent();
        w.open("");
        w.line("throw new InvalidOperationException(\"The implementation should have been generated.\");");
        w.close("");
    }
}

impl SyntaxTemplate for RxTemplate {
    fn file_prelude(&self, w: &mut SourceWriter, config: &RenderConfig) {
        if config.emit_header {
            w.line("// <auto-generated>");
            w.line("// This code is auto generated do not modify.");
            w.line("// <auto-generated />");
            w.blank();
        }
        for using in USINGS {
            w.line(format!("using {};", using));
        }
        w.blank();
    }

    fn member_observation(
        &self,
        w: &mut SourceWriter,
        lead: &str,
        source: &str,
        hop: &HopView,
        trail: &str,
    ) {
        let read = format!("{}.{}", source, hop.member);

        w.line(format!("{}Observable.Create<{}>(observer =>", lead, hop.output));
        w.open("");
        if source != "this" {
            w.open(format!("if ({} == null)", source));
            w.line(format!("observer.OnNext(default({}));", hop.output));
            w.line("return Disposable.Empty;");
            w.close("");
            w.blank();
        }
        w.line(format!("observer.OnNext({});", read));
        w.blank();
        w.line("PropertyChangedEventHandler handler = (object sender, PropertyChangedEventArgs e) =>");
        w.open("");
        w.open(format!("if (e.PropertyName == {})", quote(&hop.member)));
        w.line(format!("observer.OnNext({});", read));
        w.close("");
        w.close(";");
        w.blank();
        w.line(format!("{}.PropertyChanged += handler;", source));
        w.blank();
        w.line(format!(
            "return Disposable.Create(() => {}.PropertyChanged -= handler);",
            source
        ));
        w.close(&format!("){}", trail));
    }

    fn rebind_step(&self, w: &mut SourceWriter, hop: &HopView, trail: &str) {
        self.member_observation(w, ".Select(x => ", "x", hop, ")");
        w.line(format!(".Switch(){}", trail));
    }

    fn single_accessor(
        &self,
        w: &mut SourceWriter,
        config: &RenderConfig,
        accessor: &AccessorView,
        chain: &ChainView,
    ) {
        let source = Self::source_name(accessor.surface, "source");
        w.line("/// <summary>");
        w.line("/// Generates an IObservable which signals with updated property value changes.");
        w.line("/// </summary>");
        Self::accessor_head(
            w,
            config,
            accessor,
            &accessor.result,
            "source",
            &[Self::expression_param(
                &accessor.root,
                &accessor.result,
                "propertyExpression",
            )],
        );
        w.open("");
        self.chain_expression(w, "return ", source, chain, ";");
        w.close("");
    }

    fn dispatch_table(&self, w: &mut SourceWriter, table: &TableView) {
        let ty = format!(
            "Dictionary<string, Func<{}, IObservable<{}>>>",
            table.root, table.result
        );
        w.line(format!(
            "private static readonly {} {} = new {}()",
            ty, table.name, ty
        ));
        w.open("");
        for entry in &table.entries {
            w.open("");
            w.line(format!("{},", quote(&entry.raw_key)));
            self.chain_expression(w, "source => ", "source", entry, "");
            w.close(",");
        }
        w.close(";");
    }

    fn dispatch_accessor(
        &self,
        w: &mut SourceWriter,
        config: &RenderConfig,
        accessor: &AccessorView,
        table_name: &str,
    ) {
        let source = Self::source_name(accessor.surface, "source");
        Self::accessor_head(
            w,
            config,
            accessor,
            &accessor.result,
            "source",
            &[Self::expression_param(
                &accessor.root,
                &accessor.result,
                "propertyExpression",
            )],
        );
        w.open("");
        w.line(format!(
            "return {}[propertyExpression.Body.ToString()].Invoke({});",
            table_name, source
        ));
        w.close("");
    }

    fn combinator_method(&self, w: &mut SourceWriter, config: &RenderConfig, view: &CombinatorView) {
        let source = Self::source_name(view.surface, "objectToMonitor");

        for position in &view.positions {
            if let PositionView::Table(table) = position {
                self.dispatch_table(w, table);
                w.blank();
            }
        }

        let mut params: Vec<String> = view
            .member_types
            .iter()
            .enumerate()
            .map(|(i, ty)| {
                Self::expression_param(&view.root, ty, &format!("propertyExpression{}", i + 1))
            })
            .collect();
        let mut func_args = view.member_types.clone();
        func_args.push(view.output.clone());
        params.push(format!("Func<{}> conversionFunc", func_args.join(", ")));

        let accessor = AccessorView {
            access: view.access,
            surface: view.surface,
            root: view.root.clone(),
            result: view.output.clone(),
        };
        Self::accessor_head(w, config, &accessor, &view.output, "objectToMonitor", &params);

        w.open("");
        for (i, position) in view.positions.iter().enumerate() {
            let n = i + 1;
            match position {
                PositionView::Inline(chain) => {
                    self.chain_expression(w, &format!("var obs{} = ", n), source, chain, ";");
                }
                PositionView::Table(table) => {
                    w.line(format!(
                        "var obs{} = {}[propertyExpression{}.Body.ToString()].Invoke({});",
                        n, table.name, n, source
                    ));
                }
            }
        }
        let others: Vec<String> = (2..=view.positions.len())
            .map(|n| format!("obs{}", n))
            .collect();
        w.line(format!(
            "return obs1.CombineLatest({}, conversionFunc);",
            others.join(", ")
        ));
        w.close("");
    }

    fn open_extension_container(&self, w: &mut SourceWriter, config: &RenderConfig) {
        w.open(format!(
            "public static partial class {}",
            config.extension_container
        ));
    }

    fn close_extension_container(&self, w: &mut SourceWriter) {
        w.close("");
    }

    fn open_partial_type(&self, w: &mut SourceWriter, container: &ContainerView) {
        if let Some(namespace) = &container.namespace {
            w.open(format!("namespace {}", namespace));
        }
        for ty in container.enclosing.iter().chain(core::iter::once(&container.target)) {
            w.open(format!("{} partial class {}", ty.access.keywords(), ty.name));
        }
    }

    fn close_partial_type(&self, w: &mut SourceWriter, container: &ContainerView) {
        for _ in 0..=container.enclosing.len() {
            w.close("");
        }
        if container.namespace.is_some() {
            w.close("");
        }
    }

    fn stub_container(&self, w: &mut SourceWriter, config: &RenderConfig) {
        self.open_extension_container(w, config);
        Self::stub_overload(w, config, 1);
        for arity in 2..=config.stub_arity {
            w.blank();
            Self::stub_overload(w, config, arity);
        }
        self.close_extension_container(w);
    }

    fn stub_file_name(&self, config: &RenderConfig) -> String {
        format!("{}.g.cs", config.extension_container)
    }

    fn artifact_file_name(
        &self,
        config: &RenderConfig,
        root_name: &str,
        surface: DestinationSurface,
        ordinal: usize,
    ) -> String {
        match surface {
            DestinationSurface::Public => {
                format!("{}.{}{}.g.cs", config.method_name, root_name, ordinal)
            }
            DestinationSurface::ScopeInjected => {
                format!("{}{}.{}.g.cs", root_name, ordinal, config.method_name)
            }
        }
    }
}
