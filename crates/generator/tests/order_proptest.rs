//! Property-based tests: rendered output does not depend on request order.

use propwatch_core::{
    CombinerSignature, Expr, ExpressionArgument, Invocation, MemberId, ParamId, SymbolTable,
    TypeDecl, TypeId, Visibility,
};
use propwatch_generator::Generator;
use proptest::prelude::*;

const CONTAINER: &str = "NotifyPropertyChangedExtensions";
const FIELDS: usize = 6;

/// One observable path and the type it yields.
#[derive(Clone)]
struct Path {
    members: Vec<MemberId>,
    result: TypeId,
}

/// `App.Host` with a public `Child: Host` and `FIELDS` leaves over three
/// result types, every third one private, plus a private nested
/// `App.Host.Inner` with one public leaf.
struct World {
    symbols: SymbolTable,
    host: TypeId,
    inner: TypeId,
    string: TypeId,
    x: ParamId,
    y: ParamId,
    inner_value: MemberId,
    paths: Vec<Path>,
}

fn world() -> World {
    let mut symbols = SymbolTable::new();
    let results = [
        symbols.add_type(TypeDecl::new("string")).unwrap(),
        symbols.add_type(TypeDecl::new("int")).unwrap(),
        symbols.add_type(TypeDecl::new("bool")).unwrap(),
    ];
    let host = symbols
        .add_type(TypeDecl::new("Host").namespace("App"))
        .unwrap();
    let inner = symbols
        .add_type(
            TypeDecl::new("Inner")
                .nested_in(host)
                .visibility(Visibility::Private),
        )
        .unwrap();
    let child = symbols
        .add_member(host, "Child", host, Visibility::Public)
        .unwrap();
    let inner_value = symbols
        .add_member(inner, "Value", results[1], Visibility::Public)
        .unwrap();

    let mut paths = Vec::new();
    for i in 0..FIELDS {
        let visibility = if i % 3 == 2 {
            Visibility::Private
        } else {
            Visibility::Public
        };
        let result = results[i % 3];
        let leaf = symbols
            .add_member(host, format!("P{}", i), result, visibility)
            .unwrap();
        paths.push(Path {
            members: vec![leaf],
            result,
        });
        paths.push(Path {
            members: vec![child, leaf],
            result,
        });
    }

    let x = symbols.add_param("x", host).unwrap();
    let y = symbols.add_param("y", inner).unwrap();
    World {
        symbols,
        host,
        inner,
        string: results[0],
        x,
        y,
        inner_value,
        paths,
    }
}

#[derive(Clone, Debug)]
enum Request {
    Single(usize),
    Combined(Vec<usize>),
    Inner,
}

fn request() -> impl Strategy<Value = Request> {
    let paths = FIELDS * 2;
    prop_oneof![
        4 => (0..paths).prop_map(Request::Single),
        2 => prop::collection::vec(0..paths, 2..4).prop_map(Request::Combined),
        1 => Just(Request::Inner),
    ]
}

impl World {
    fn arg(&self, path: &Path) -> ExpressionArgument {
        let body = path
            .members
            .iter()
            .fold(Expr::param(self.x), |body, &m| body.member(m));
        ExpressionArgument::inline(self.symbols.expr_text(&body), self.x, body)
    }

    fn invocation(&self, request: &Request) -> Invocation {
        match request {
            Request::Single(i) => Invocation::single(CONTAINER, self.host, self.arg(&self.paths[*i])),
            Request::Combined(picks) => {
                let paths: Vec<&Path> = picks.iter().map(|&i| &self.paths[i]).collect();
                let signature = CombinerSignature::new(
                    self.host,
                    paths.iter().map(|p| p.result).collect(),
                    self.string,
                );
                Invocation::combined(
                    CONTAINER,
                    paths.iter().map(|p| self.arg(p)).collect(),
                    signature,
                )
                .unwrap()
            }
            Request::Inner => {
                let body = Expr::param(self.y).member(self.inner_value);
                Invocation::single(
                    CONTAINER,
                    self.inner,
                    ExpressionArgument::inline(self.symbols.expr_text(&body), self.y, body),
                )
            }
        }
    }

    fn invocations(&self, requests: &[Request]) -> Vec<Invocation> {
        requests.iter().map(|r| self.invocation(r)).collect()
    }
}

proptest! {
    /// Shuffling the requests yields byte-identical artifacts.
    #[test]
    fn artifacts_are_independent_of_request_order(
        (requests, shuffled) in prop::collection::vec(request(), 1..24)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let w = world();
        let generator = Generator::new();
        let a = generator.run(&w.symbols, &w.invocations(&requests)).unwrap();
        let b = generator.run(&w.symbols, &w.invocations(&shuffled)).unwrap();

        prop_assert!(a.is_success());
        prop_assert!(!a.artifacts.is_empty());
        prop_assert_eq!(&a.artifacts, &b.artifacts);
        prop_assert_eq!(a.stub, b.stub);
    }

    /// Every artifact name is unique within one run.
    #[test]
    fn artifact_names_are_unique(requests in prop::collection::vec(request(), 1..24)) {
        let w = world();
        let output = Generator::new()
            .run(&w.symbols, &w.invocations(&requests))
            .unwrap();

        let mut names: Vec<&str> = output.artifacts.iter().map(|a| a.file_name.as_str()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), total);
    }
}
