//! Subproject evaluation-order graph.
//!
//! Edges point from a dependency to its dependent, so a topological walk
//! yields projects in the order their configuration must be resolved.
//! Cycles are reported instead of looping.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use trestle_core::project::ProjectNode;
use trestle_util::errors::TrestleError;

/// Evaluation-dependency graph over included projects.
pub struct EvaluationGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl EvaluationGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
        }
    }

    /// Build the graph for `projects`, in declaration order.
    ///
    /// Fails if a project depends on a name that is not included.
    pub fn from_projects(projects: &[ProjectNode]) -> miette::Result<Self> {
        let mut graph = Self::new();
        for project in projects {
            graph.add_project(project.name());
        }
        for project in projects {
            for dependency in &project.evaluation_depends_on {
                graph.add_dependency(dependency, project.name())?;
            }
        }
        Ok(graph)
    }

    /// Add a project, returning the existing index if already present.
    pub fn add_project(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.indices.insert(name.to_string(), idx);
        idx
    }

    /// Declare that `dependent` is evaluated after `dependency`.
    pub fn add_dependency(&mut self, dependency: &str, dependent: &str) -> miette::Result<()> {
        let from = self.index_of(dependency, dependent)?;
        let to = self.index_of(dependent, dependent)?;
        self.graph.update_edge(from, to, ());
        Ok(())
    }

    fn index_of(&self, name: &str, referenced_by: &str) -> Result<NodeIndex, TrestleError> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| TrestleError::Settings {
                message: format!(
                    "project `{referenced_by}` depends on unknown project `{name}`"
                ),
            })
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Projects in evaluation order: every project follows the projects it
    /// depends on, and otherwise keeps declaration order.
    pub fn evaluation_order(&self) -> miette::Result<Vec<String>> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| self.graph.neighbors_directed(idx, Direction::Incoming).count())
            .collect();

        let mut ready: BTreeSet<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(idx) = ready.pop_first() {
            order.push(self.graph[idx].clone());
            for next in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                in_degree[next.index()] -= 1;
                if in_degree[next.index()] == 0 {
                    ready.insert(next);
                }
            }
        }

        if order.len() < self.graph.node_count() {
            return Err(TrestleError::CyclicDependency {
                nodes: self.find_cycle(),
            }
            .into());
        }
        Ok(order)
    }

    /// Names along one dependency cycle, starting and ending at the same
    /// project (`a -> b -> a` reads "a depends on b, which depends on a").
    fn find_cycle(&self) -> Vec<String> {
        let scc = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || self.graph.contains_edge(component[0], component[0])
            })
            .min_by_key(|component| component.iter().min().copied());

        let Some(scc) = scc else {
            return Vec::new();
        };
        let members: HashSet<NodeIndex> = scc.iter().copied().collect();
        let Some(start) = scc.iter().min().copied() else {
            return Vec::new();
        };

        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            let mut dependencies: Vec<NodeIndex> = self
                .graph
                .neighbors_directed(current, Direction::Incoming)
                .filter(|n| members.contains(n))
                .collect();
            dependencies.sort();
            for dep in dependencies {
                if dep == start {
                    let mut path = vec![current];
                    let mut node = current;
                    while let Some(&p) = parent.get(&node) {
                        path.push(p);
                        node = p;
                    }
                    path.reverse();
                    path.push(start);
                    return path.into_iter().map(|idx| self.graph[idx].clone()).collect();
                }
                if visited.insert(dep) {
                    parent.insert(dep, current);
                    queue.push_back(dep);
                }
            }
        }

        // unreachable for a strongly connected component
        let mut names: Vec<String> = scc.iter().map(|idx| self.graph[*idx].clone()).collect();
        names.sort();
        names
    }
}

impl Default for EvaluationGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle_nodes(err: miette::Report) -> Vec<String> {
        match err.downcast_ref::<TrestleError>() {
            Some(TrestleError::CyclicDependency { nodes }) => nodes.clone(),
            other => panic!("expected CyclicDependency, got {other:?}"),
        }
    }

    #[test]
    fn independent_projects_keep_declaration_order() {
        let projects = vec![
            ProjectNode::new("c"),
            ProjectNode::new("a"),
            ProjectNode::new("b"),
        ];
        let graph = EvaluationGraph::from_projects(&projects).unwrap();
        assert_eq!(graph.evaluation_order().unwrap(), vec!["c", "a", "b"]);
    }

    #[test]
    fn dependencies_are_evaluated_first() {
        let projects = vec![
            ProjectNode::new("feature").depends_on("app"),
            ProjectNode::new("plugin").depends_on("app"),
            ProjectNode::new("app"),
        ];
        let graph = EvaluationGraph::from_projects(&projects).unwrap();
        assert_eq!(
            graph.evaluation_order().unwrap(),
            vec!["app", "feature", "plugin"]
        );
    }

    #[test]
    fn chain_is_ordered() {
        let projects = vec![
            ProjectNode::new("a").depends_on("b"),
            ProjectNode::new("b").depends_on("c"),
            ProjectNode::new("c"),
        ];
        let graph = EvaluationGraph::from_projects(&projects).unwrap();
        assert_eq!(graph.evaluation_order().unwrap(), vec!["c", "b", "a"]);
    }

    #[test]
    fn two_node_cycle_is_reported() {
        let projects = vec![
            ProjectNode::new("a").depends_on("b"),
            ProjectNode::new("b").depends_on("a"),
        ];
        let graph = EvaluationGraph::from_projects(&projects).unwrap();
        let err = graph.evaluation_order().unwrap_err();
        assert_eq!(cycle_nodes(err), vec!["a", "b", "a"]);
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let projects = vec![ProjectNode::new("app").depends_on("app")];
        let graph = EvaluationGraph::from_projects(&projects).unwrap();
        let err = graph.evaluation_order().unwrap_err();
        assert_eq!(cycle_nodes(err), vec!["app", "app"]);
    }

    #[test]
    fn cycle_behind_acyclic_prefix() {
        let projects = vec![
            ProjectNode::new("base"),
            ProjectNode::new("x").depends_on("base").depends_on("z"),
            ProjectNode::new("y").depends_on("x"),
            ProjectNode::new("z").depends_on("y"),
        ];
        let graph = EvaluationGraph::from_projects(&projects).unwrap();
        let nodes = cycle_nodes(graph.evaluation_order().unwrap_err());
        assert_eq!(nodes, vec!["x", "z", "y", "x"]);
    }

    #[test]
    fn unknown_dependency_is_rejected() {
        let projects = vec![ProjectNode::new("feature").depends_on("app")];
        let err = EvaluationGraph::from_projects(&projects).err().unwrap();
        assert!(err.to_string().contains("unknown project `app`"));
    }

    #[test]
    fn duplicate_project_returns_same_index() {
        let mut graph = EvaluationGraph::new();
        let a = graph.add_project("app");
        let b = graph.add_project("app");
        assert_eq!(a, b);
        assert_eq!(graph.len(), 1);
    }
}
