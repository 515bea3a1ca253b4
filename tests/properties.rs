use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ssnclust::parser::RawRow;
use ssnclust::{cluster_rows, ClusterRun, SsnConfig};

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

struct Network {
    /// Aliases per node.
    nodes: Vec<Vec<String>>,
    /// (percent identity, node a, node b, alias index a, alias index b)
    edges: Vec<(f64, usize, usize, usize, usize)>,
}

fn random_network(rng: &mut StdRng) -> Network {
    let node_count = rng.gen_range(1..40);
    let mut next = 0;
    let nodes: Vec<Vec<String>> = (0..node_count)
        .map(|_| {
            let aliases = rng.gen_range(1..4);
            (0..aliases)
                .map(|_| {
                    next += 1;
                    format!("ACC{:04}", next)
                })
                .collect()
        })
        .collect();

    let edge_count = rng.gen_range(0..node_count * 2);
    let edges = (0..edge_count)
        .map(|_| {
            let a = rng.gen_range(0..node_count);
            let b = rng.gen_range(0..node_count);
            let pid = (rng.gen_range(0..10_000) as f64) / 100.0;
            (pid, a, b, rng.gen_range(0..nodes[a].len()), rng.gen_range(0..nodes[b].len()))
        })
        .collect();

    Network { nodes, edges }
}

impl Network {
    fn node_rows(&self) -> Vec<RawRow> {
        self.nodes.iter().enumerate()
            .map(|(i, aliases)| RawRow::new(i as u64 + 2, [format!("N{}", i), aliases.join("|")]))
            .collect()
    }

    fn edge_rows(&self) -> Vec<RawRow> {
        self.edges.iter().enumerate()
            .map(|(i, &(pid, a, b, ia, ib))| {
                let pair = format!("{},{}", self.nodes[a][ia], self.nodes[b][ib]);
                RawRow::new(i as u64 + 2, [format!("E{}", i), pid.to_string(),
                    String::new(), String::new(), String::new(), pair])
            })
            .collect()
    }

    fn cluster(&self, min: f64) -> ClusterRun {
        let mut config = SsnConfig::default();
        config.cluster.min_percent_identity = min;
        cluster_rows(&self.node_rows(), &self.edge_rows(), &config).unwrap()
    }

    fn reference_roots(&self, min: f64) -> Vec<usize> {
        let mut uf = UnionFind::new(self.nodes.len());
        for &(pid, a, b, _, _) in &self.edges {
            if pid >= min {
                uf.union(a, b);
            }
        }
        (0..self.nodes.len()).map(|i| uf.find(i)).collect()
    }
}

/// Cluster rank of every node, indexed by load order.
fn node_ranks(run: &ClusterRun) -> Vec<usize> {
    let mut ranks = vec![0; run.graph.len()];
    for cluster in &run.ranked {
        for id in &cluster.members.members {
            ranks[id.index()] = cluster.rank;
        }
    }
    ranks
}

#[test]
fn test_components_match_union_find() {
    let mut rng = StdRng::seed_from_u64(0x55_4e_11);
    for _ in 0..200 {
        let network = random_network(&mut rng);
        let min = rng.gen_range(0..100) as f64;
        let run = network.cluster(min);
        let ranks = node_ranks(&run);
        let roots = network.reference_roots(min);

        for a in 0..ranks.len() {
            assert!(ranks[a] > 0, "node {} missing from every cluster", a);
            for b in 0..ranks.len() {
                assert_eq!(ranks[a] == ranks[b], roots[a] == roots[b],
                    "nodes {} and {} disagree with union-find at threshold {}", a, b, min);
            }
        }
    }
}

#[test]
fn test_every_accession_once() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let network = random_network(&mut rng);
        let rendered = network.cluster(rng.gen_range(0..100) as f64).render();

        let mut expected: Vec<String> = network.nodes.iter().flatten().cloned().collect();
        expected.sort();

        let universe: Vec<String> = String::from_utf8(rendered.accessions).unwrap()
            .lines().map(String::from).collect();
        assert_eq!(universe, expected);

        let mut mapped: Vec<String> = String::from_utf8(rendered.clusters).unwrap()
            .lines()
            .map(|line| line.split('\t').nth(1).unwrap().to_string())
            .collect();
        mapped.sort();
        assert_eq!(mapped, expected);
    }
}

#[test]
fn test_cluster_count_monotone_in_threshold() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let network = random_network(&mut rng);
        let mut previous = 0;
        for step in 0..=10 {
            let count = network.cluster(step as f64 * 10.0).ranked.len();
            assert!(count >= previous, "cluster count fell from {} to {}", previous, count);
            previous = count;
        }
        assert_eq!(previous, network.nodes.len());
    }
}

#[test]
fn test_ranks_descend_by_size() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..100 {
        let network = random_network(&mut rng);
        let run = network.cluster(rng.gen_range(0..60) as f64);
        for (i, pair) in run.ranked.windows(2).enumerate() {
            assert_eq!(pair[0].rank, i + 1);
            assert!(pair[0].size() >= pair[1].size());
            if pair[0].size() == pair[1].size() {
                assert!(pair[0].members.seed() < pair[1].members.seed());
            }
        }
    }
}
