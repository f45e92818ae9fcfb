//! Cross-node reference resolution.
//!
//! Finalizing an instance tree walks it in declaration order: each instance's
//! effective table is visited front to back, and an object parameter's child
//! instance is walked completely before the parameter itself is recorded.
//! Every visit:
//! 1. **Binding check:** The instance's node must carry a complete native binding.
//! 2. **Reference binding:** `Self.<p>` reads the same instance, `Parent.<p>` the nearest
//!    enclosing instance that declares `p`; the target is itself resolved first.
//! 3. **Validation:** Every literal and every bound reference is re-checked against its kind.
//!
//! The walk keeps a stack of the `(instance, parameter)` pairs currently being
//! resolved. Reaching a pair that is already on the stack is a cycle and
//! fails immediately, so a cyclic tree is rejected rather than recursed into.
//! The first error stops the walk.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::common::{ConfigError, Result};
use crate::handoff::{FrozenConfiguration, FrozenParam, FrozenValue};
use crate::instance::ConfigurationInstance;
use crate::params::{Cycles, ParamKind, ParameterSpec, RefTarget, Reference, Value};

/// One instance of the tree, addressed by index.
struct Frame<'a> {
    path: String,
    instance: &'a ConfigurationInstance,
    parent: Option<usize>,
    /// `(parameter index, child frame index)` for every object parameter.
    children: Vec<(usize, usize)>,
}

impl Frame<'_> {
    fn child_frame(&self, param: usize) -> Option<usize> {
        self.children.iter().find(|(p, _)| *p == param).map(|(_, c)| *c)
    }

    fn spec(&self, param: usize) -> &ParameterSpec {
        &self.instance.node().params()[param]
    }

    fn label(&self, param: usize) -> String {
        format!("{}.{}", self.path, self.spec(param).name())
    }
}

struct Resolver<'f, 'a> {
    frames: &'f [Frame<'a>],
    resolved: Vec<Vec<Option<FrozenValue>>>,
    stack: Vec<(usize, usize)>,
}

/// Resolves, validates and snapshots the tree rooted at `root`.
///
/// The root's path is its type name.
///
/// # Errors
///
/// * [`ConfigError::MissingBinding`] for an instance whose node has no binding.
/// * [`ConfigError::UnresolvedReference`] when no target instance declares the parameter.
/// * [`ConfigError::CyclicReference`] when a reference chain loops.
/// * [`ConfigError::TypeMismatch`] when a value (literal or bound) does not match its kind.
pub fn resolve(root: &ConfigurationInstance) -> Result<FrozenConfiguration> {
    let mut frames = Vec::new();
    let _ = push_frame(&mut frames, root, root.type_name().to_string(), None);

    let mut resolver = Resolver {
        frames: &frames,
        resolved: frames
            .iter()
            .map(|f| vec![None; f.instance.values().len()])
            .collect(),
        stack: Vec::new(),
    };

    let frozen = resolver.resolve_frame(0)?;
    debug!(root = %frozen.path(), instances = frames.len(), "finalized configuration");
    Ok(frozen)
}

/// Appends `instance` and its object-held descendants in pre-order.
fn push_frame<'a>(
    frames: &mut Vec<Frame<'a>>,
    instance: &'a ConfigurationInstance,
    path: String,
    parent: Option<usize>,
) -> usize {
    let index = frames.len();
    frames.push(Frame {
        path,
        instance,
        parent,
        children: Vec::new(),
    });

    for (p, (spec, value)) in instance.entries().enumerate() {
        if let Value::Object(child) = value {
            let child_path = format!("{}.{}", frames[index].path, spec.name());
            let c = push_frame(frames, child, child_path, Some(index));
            frames[index].children.push((p, c));
        }
    }
    index
}

impl Resolver<'_, '_> {
    fn resolve_frame(&mut self, f: usize) -> Result<FrozenConfiguration> {
        let frames = self.frames;
        let frame = &frames[f];
        let node = frame.instance.node();

        let binding = node
            .binding()
            .filter(|b| b.is_complete())
            .cloned()
            .ok_or_else(|| ConfigError::MissingBinding {
                type_name: node.type_name().to_string(),
                path: frame.path.clone(),
            })?;

        let mut params = Vec::with_capacity(node.params().len());
        let mut children = Vec::new();
        for (p, spec) in node.params().iter().enumerate() {
            if let Some(c) = frame.child_frame(p) {
                children.push(Arc::new(self.resolve_frame(c)?));
            }
            let value = self.resolve_param(f, p)?;
            params.push(FrozenParam::new(spec.name(), value));
        }

        Ok(FrozenConfiguration::new(
            frame.path.clone(),
            node.type_name(),
            binding,
            params,
            children,
        ))
    }

    fn resolve_param(&mut self, f: usize, p: usize) -> Result<FrozenValue> {
        if let Some(done) = &self.resolved[f][p] {
            return Ok(done.clone());
        }

        let frames = self.frames;
        let frame = &frames[f];
        let spec = frame.spec(p);

        if let Some(start) = self.stack.iter().position(|e| *e == (f, p)) {
            let mut cycle: Vec<String> = self.stack[start..]
                .iter()
                .map(|(g, q)| frames[*g].label(*q))
                .collect();
            cycle.push(frame.label(p));
            return Err(ConfigError::CyclicReference { cycle });
        }

        let value = match (&frame.instance.values()[p], frame.child_frame(p)) {
            (Value::Object(_), Some(c)) => {
                let child = &frames[c];
                FrozenValue::Object {
                    binding: child
                        .instance
                        .node()
                        .binding()
                        .map(|b| b.name().to_string())
                        .unwrap_or_default(),
                    path: child.path.clone(),
                }
            }
            (Value::Ref(reference), _) => {
                let (tf, tp) = self.locate(f, p, reference)?;
                self.stack.push((f, p));
                let target = self.resolve_param(tf, tp);
                let _ = self.stack.pop();
                let target = target?;
                trace!(
                    param = %frame.label(p),
                    reference = %reference,
                    source = %frames[tf].label(tp),
                    "bound reference"
                );
                rebind(spec, &frame.label(p), target)?
            }
            (literal, _) => freeze(spec, &frame.label(p), literal.clone())?,
        };

        self.resolved[f][p] = Some(value.clone());
        Ok(value)
    }

    /// Finds the `(frame, parameter)` a reference reads from.
    fn locate(&self, f: usize, p: usize, reference: &Reference) -> Result<(usize, usize)> {
        let frames = self.frames;
        let frame = &frames[f];
        let name = reference.param();

        let found = match reference.target() {
            RefTarget::This => frame.instance.node().index_of(name).map(|i| (f, i)),
            RefTarget::Parent => std::iter::successors(frame.parent, |g| frames[*g].parent)
                .find_map(|g| frames[g].instance.node().index_of(name).map(|i| (g, i))),
        };

        found.ok_or_else(|| ConfigError::UnresolvedReference {
            path: frame.path.clone(),
            param: frame.spec(p).name().to_string(),
            reference: reference.to_string(),
        })
    }
}

/// Validates a literal and converts it to its frozen form.
fn freeze(spec: &ParameterSpec, label: &str, value: Value) -> Result<FrozenValue> {
    let frozen = match (spec.kind(), spec.kind().check(label, value)?) {
        (_, Value::UInt(v)) => FrozenValue::UInt(v),
        (_, Value::Int(v)) => FrozenValue::Int(v),
        (_, Value::Bool(v)) => FrozenValue::Bool(v),
        (_, Value::Cycles(c)) => FrozenValue::Cycles(c.get()),
        (ParamKind::Enum(ty), Value::Enum(variant)) => FrozenValue::Enum {
            enumeration: ty.name().to_string(),
            ordinal: ty.resolve(&variant)?,
            variant,
        },
        (kind, other) => return Err(kind.mismatch(label, &other)),
    };
    Ok(frozen)
}

/// Re-checks a value read through a reference against the referencing parameter's kind.
fn rebind(spec: &ParameterSpec, label: &str, target: FrozenValue) -> Result<FrozenValue> {
    let value = match target {
        FrozenValue::UInt(v) => Value::UInt(v),
        FrozenValue::Int(v) => Value::Int(v),
        FrozenValue::Bool(v) => Value::Bool(v),
        FrozenValue::Cycles(v) => Value::Cycles(Cycles(v)),
        FrozenValue::Enum {
            enumeration,
            variant,
            ..
        } => match spec.kind().enum_type() {
            Some(ty) if ty.name() == enumeration => Value::Enum(variant),
            _ => {
                return Err(ConfigError::mismatch(
                    label,
                    spec.kind(),
                    format_args!("'{variant}' ({enumeration})"),
                ));
            }
        },
        FrozenValue::Object { path, .. } => {
            return Err(ConfigError::mismatch(
                label,
                spec.kind(),
                format_args!("object at {path}"),
            ));
        }
    };
    freeze(spec, label, value)
}
