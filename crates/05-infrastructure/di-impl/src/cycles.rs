//! 循环依赖检测
//!
//! 只用于诊断：循环依赖在生成阶段不会导致扫描失败，由运行时容器在构造时报告。

use di_abstractions::Scan;
use std::collections::BTreeMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Visited,
}

/// 查找服务绑定之间的循环依赖
///
/// 使用深度优先搜索，每个环只报告一次，按发现顺序返回环上的定义名称。
pub fn find_dependency_cycles(scan: &Scan) -> Vec<Vec<String>> {
    let by_name: BTreeMap<&str, usize> = scan
        .definitions
        .iter()
        .enumerate()
        .map(|(index, def)| (def.name.as_str(), index))
        .collect();

    let graph: Vec<Vec<usize>> = scan
        .definitions
        .iter()
        .map(|def| {
            def.dependencies()
                .filter_map(|name| by_name.get(name).copied())
                .collect()
        })
        .collect();

    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut path = Vec::new();
    let mut cycles = Vec::new();

    for node in 0..graph.len() {
        if marks[node] == Mark::Unvisited {
            visit(node, &graph, &mut marks, &mut path, &mut cycles);
        }
    }

    cycles
        .into_iter()
        .map(|cycle: Vec<usize>| {
            cycle
                .into_iter()
                .map(|index| scan.definitions[index].name.clone())
                .collect()
        })
        .collect()
}

/// 从 `root` 开始的深度优先搜索
///
/// 用显式工作栈代替递归，很长的依赖链也不会耗尽调用栈。`path` 是当前路径，
/// 工作栈中每一帧记录节点和下一条待访问边的下标。
fn visit(
    root: usize,
    graph: &[Vec<usize>],
    marks: &mut [Mark],
    path: &mut Vec<usize>,
    cycles: &mut Vec<Vec<usize>>,
) {
    let mut work = vec![(root, 0usize)];
    marks[root] = Mark::Visiting;
    path.push(root);

    while let Some(frame) = work.last_mut() {
        let (node, next) = *frame;

        let Some(&dep) = graph[node].get(next) else {
            work.pop();
            path.pop();
            marks[node] = Mark::Visited;
            continue;
        };
        frame.1 += 1;

        match marks[dep] {
            Mark::Visiting => {
                if let Some(start) = path.iter().position(|&n| n == dep) {
                    cycles.push(path[start..].to_vec());
                }
            }
            Mark::Unvisited => {
                marks[dep] = Mark::Visiting;
                path.push(dep);
                work.push((dep, 0));
            }
            Mark::Visited => {}
        }
    }
}
