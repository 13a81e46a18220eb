//! 需求分配引擎
//!
//! 以區域為單位，依優先順序分層（數字越小越優先）的貪婪分配：
//! 同一優先層內依機種首次出現順序處理，機種內依相容性清單順序填滿產線。

use std::collections::HashMap;

use linecap_core::{Compatibility, DemandTable, ModelAssignment, PlannerConfig, ProductionLine};

/// 剩餘需求池（每個區域一份，區域之間不共用）
#[derive(Debug, Clone, Default)]
pub struct RemainingDemand {
    /// 機種首次加入的順序
    order: Vec<String>,
    seeded: HashMap<String, f64>,
    remaining: HashMap<String, f64>,
    tolerance: f64,
}

impl RemainingDemand {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Default::default()
        }
    }

    /// 加入機種需求（已存在的機種不重複加入）
    pub fn seed(&mut self, model_id: &str, units: f64) {
        if self.seeded.contains_key(model_id) {
            return;
        }
        let units = units.max(0.0);
        self.order.push(model_id.to_string());
        self.seeded.insert(model_id.to_string(), units);
        self.remaining.insert(model_id.to_string(), units);
    }

    /// 剩餘需求（不在池中時為 0）
    pub fn get(&self, model_id: &str) -> f64 {
        self.remaining.get(model_id).copied().unwrap_or(0.0)
    }

    /// 初始需求
    pub fn seeded(&self, model_id: &str) -> f64 {
        self.seeded.get(model_id).copied().unwrap_or(0.0)
    }

    /// 扣除已分配數量
    ///
    /// 剩餘量落在容差內即歸零，且不會小於 0。
    pub fn consume(&mut self, model_id: &str, units: f64) {
        if let Some(remaining) = self.remaining.get_mut(model_id) {
            let mut left = (*remaining - units).max(0.0);
            if left <= self.tolerance {
                left = 0.0;
            }
            *remaining = left;
        }
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.seeded.contains_key(model_id)
    }

    /// 池中機種（依加入順序）
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// 未滿足的機種與數量（依加入順序）
    pub fn unfulfilled(&self) -> Vec<(&str, f64)> {
        self.models()
            .map(|id| (id, self.get(id)))
            .filter(|(_, remaining)| *remaining > self.tolerance)
            .collect()
    }

    pub fn total_seeded(&self) -> f64 {
        self.order.iter().map(|id| self.seeded(id)).sum()
    }

    pub fn total_unfulfilled(&self) -> f64 {
        self.unfulfilled().iter().map(|(_, units)| units).sum()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// 將機種分配到單一產線
///
/// 回傳實際分配數量。產能不足時取可用時間能生產的數量（不取整），
/// 並將產線已用時間設為可用時間。分配量為 0 時不記錄任何分配。
pub fn allocate_to_line(
    line: &mut ProductionLine,
    compatibility: &Compatibility,
    model_name: &str,
    requested_units: f64,
) -> f64 {
    let adjusted_cycle_time = match compatibility.adjusted_cycle_time() {
        Some(ct) => ct,
        None => {
            tracing::debug!(
                "產線 {} 機種 {} 週期時間或效率無效，略過",
                line.id,
                compatibility.model_id
            );
            return 0.0;
        }
    };

    let available_time = line.remaining_time();
    if available_time <= 0.0 {
        return 0.0;
    }

    let max_units = available_time / adjusted_cycle_time;
    let (allocated_units, time_required, binds) = if max_units <= requested_units {
        (max_units, available_time, true)
    } else {
        (
            requested_units,
            requested_units * adjusted_cycle_time,
            false,
        )
    };

    if allocated_units <= 0.0 {
        return 0.0;
    }

    // 產能用盡時直接設為可用時間，避免浮點累加誤差
    if binds {
        line.time_used_daily = line.time_available_daily;
    } else {
        line.time_used_daily += time_required;
    }

    line.assignments.push(ModelAssignment::new(
        compatibility.model_id.clone(),
        model_name.to_string(),
        allocated_units,
        requested_units,
        time_required,
        compatibility.cycle_time,
        compatibility.efficiency,
        compatibility.priority,
    ));

    allocated_units
}

/// 相容性索引：產線ID → 相容性清單（依優先順序穩定排序）
#[derive(Debug, Clone, Default)]
pub struct CompatibilityIndex<'c> {
    by_line: HashMap<&'c str, Vec<&'c Compatibility>>,
}

impl<'c> CompatibilityIndex<'c> {
    pub fn new(compatibilities: &'c [Compatibility]) -> Self {
        let mut by_line: HashMap<&'c str, Vec<&'c Compatibility>> = HashMap::new();
        for compat in compatibilities {
            by_line.entry(compat.line_id.as_str()).or_default().push(compat);
        }
        for list in by_line.values_mut() {
            list.sort_by_key(|c| c.priority);
        }
        Self { by_line }
    }

    pub fn for_line(&self, line_id: &str) -> &[&'c Compatibility] {
        self.by_line.get(line_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 依產線順序串接各產線的相容性清單
    pub fn for_lines(&self, lines: &[ProductionLine]) -> Vec<&'c Compatibility> {
        lines
            .iter()
            .flat_map(|line| self.for_line(&line.id).iter().copied())
            .collect()
    }

    /// 指向未知產線的相容性
    pub fn unknown_lines<'l, I>(&self, known_line_ids: I) -> Vec<&'c str>
    where
        I: IntoIterator<Item = &'l str>,
    {
        let known: std::collections::HashSet<&str> = known_line_ids.into_iter().collect();
        let mut unknown: Vec<&'c str> = self
            .by_line
            .keys()
            .copied()
            .filter(|id| !known.contains(id))
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

/// 區域分配結果
#[derive(Debug, Clone)]
pub struct AreaAllocation {
    pub area: String,
    /// 分配後的產線（保留輸入順序）
    pub lines: Vec<ProductionLine>,
    pub remaining: RemainingDemand,
    /// 參與分配的相容性（產線屬於本區域且機種當年有需求）
    pub eligible: Vec<Compatibility>,
}

impl AreaAllocation {
    /// 機種在本區域的總分配量
    pub fn allocated_units(&self, model_id: &str) -> f64 {
        self.lines
            .iter()
            .flat_map(|line| line.assignments.iter())
            .filter(|a| a.model_id == model_id)
            .map(|a| a.allocated_units_daily)
            .sum()
    }

    pub fn total_allocated_units(&self) -> f64 {
        self.lines
            .iter()
            .flat_map(|line| line.assignments.iter())
            .map(|a| a.allocated_units_daily)
            .sum()
    }

    /// 產線可生產的機種（依相容性順序，去重）
    pub fn models_for_line(&self, line_id: &str) -> Vec<&str> {
        let mut models: Vec<&str> = Vec::new();
        for compat in self.eligible.iter().filter(|c| c.line_id == line_id) {
            if !models.contains(&compat.model_id.as_str()) {
                models.push(&compat.model_id);
            }
        }
        models
    }
}

/// 分配引擎
pub struct AllocationEngine<'a> {
    config: &'a PlannerConfig,
}

impl<'a> AllocationEngine<'a> {
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// 分配單一區域
    ///
    /// `compatibilities` 須依產線順序排列，產線內依優先順序排列（見 [`CompatibilityIndex::for_lines`]）。
    pub fn allocate(
        &self,
        area: &str,
        mut lines: Vec<ProductionLine>,
        compatibilities: &[&Compatibility],
        demand: &DemandTable,
    ) -> AreaAllocation {
        let line_index: HashMap<String, usize> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.id.clone(), i))
            .collect();

        let eligible: Vec<&Compatibility> = compatibilities
            .iter()
            .copied()
            .filter(|c| line_index.contains_key(&c.line_id) && demand.contains(&c.model_id))
            .collect();

        let mut remaining = RemainingDemand::new(self.config.demand_tolerance);
        for compat in &eligible {
            let units = demand.daily_demand(&compat.model_id).unwrap_or(0.0);
            remaining.seed(&compat.model_id, units);
        }

        tracing::debug!(
            "區域 {}：產線 {} 條，相容性 {} 筆，機種 {} 個",
            area,
            lines.len(),
            eligible.len(),
            remaining.len()
        );

        let mut priorities: Vec<u32> = eligible.iter().map(|c| c.priority).collect();
        priorities.sort_unstable();
        priorities.dedup();

        for priority in priorities {
            for (model_id, group) in group_by_model(&eligible, priority) {
                for compat in group {
                    let requested = remaining.get(model_id);
                    if requested <= 0.0 {
                        break;
                    }

                    let line = &mut lines[line_index[&compat.line_id]];
                    let allocated =
                        allocate_to_line(line, compat, demand.model_name(model_id), requested);

                    if allocated > 0.0 {
                        remaining.consume(model_id, allocated);
                        tracing::debug!(
                            "優先順序 {}：{} → {} 分配 {:.2}（剩餘 {:.2}）",
                            priority,
                            model_id,
                            compat.line_id,
                            allocated,
                            remaining.get(model_id)
                        );
                    }
                }
            }
        }

        AreaAllocation {
            area: area.to_string(),
            lines,
            remaining,
            eligible: eligible.into_iter().cloned().collect(),
        }
    }
}

/// 取出某優先層的相容性，依機種首次出現順序分組
fn group_by_model<'c>(
    compatibilities: &[&'c Compatibility],
    priority: u32,
) -> Vec<(&'c str, Vec<&'c Compatibility>)> {
    let mut groups: Vec<(&'c str, Vec<&'c Compatibility>)> = Vec::new();
    let mut position: HashMap<&'c str, usize> = HashMap::new();

    for &compat in compatibilities.iter().filter(|c| c.priority == priority) {
        let model_id = compat.model_id.as_str();
        match position.get(model_id) {
            Some(&i) => groups[i].1.push(compat),
            None => {
                position.insert(model_id, groups.len());
                groups.push((model_id, vec![compat]));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use linecap_core::{ModelCatalog, VolumeRecord};
    use proptest::prelude::*;
    use rstest::rstest;

    fn line(id: &str, seconds: f64) -> ProductionLine {
        ProductionLine::new(id.to_string(), id.to_string(), "SMT".to_string(), seconds)
    }

    fn demand(entries: &[(&str, f64)]) -> DemandTable {
        let volumes: Vec<VolumeRecord> = entries
            .iter()
            .map(|(id, daily)| VolumeRecord::new(id, 2025, daily * 240.0, 240.0))
            .collect();
        DemandTable::for_year(&volumes, 2025, &ModelCatalog::default())
    }

    #[test]
    fn test_remaining_demand_snaps_within_tolerance() {
        let mut pool = RemainingDemand::new(0.01);
        pool.seed("A", 10.0);
        pool.seed("A", 99.0);
        assert_eq!(pool.get("A"), 10.0);

        pool.consume("A", 9.995);
        assert_eq!(pool.get("A"), 0.0);
        assert!(pool.unfulfilled().is_empty());

        pool.seed("B", 5.0);
        pool.consume("B", 7.0);
        assert_eq!(pool.get("B"), 0.0);
        assert_eq!(pool.get("missing"), 0.0);
        assert_eq!(pool.total_seeded(), 15.0);
    }

    #[test]
    fn test_allocate_to_line_fits() {
        let mut l = line("L1", 28_800.0);
        let compat = Compatibility::new("L1", "A", 300.0, 85.0, 1);

        let allocated = allocate_to_line(&mut l, &compat, "Model A", 40.0);

        assert_eq!(allocated, 40.0);
        assert!((l.time_used_daily - 40.0 * 300.0 / 0.85).abs() < 1e-6);
        assert_eq!(l.assignments.len(), 1);
        assert_eq!(l.assignments[0].demand_units_daily, 40.0);
        assert_eq!(l.assignments[0].fulfillment_percent, 100.0);
    }

    #[test]
    fn test_allocate_to_line_binds_capacity_exactly() {
        let mut l = line("L1", 28_800.0);
        let compat = Compatibility::new("L1", "A", 300.0, 85.0, 1);

        let allocated = allocate_to_line(&mut l, &compat, "Model A", 500.0);

        assert!((allocated - 81.6).abs() < 1e-9);
        assert_eq!(l.time_used_daily, l.time_available_daily);
        assert_eq!(l.utilization_percent(), 100.0);
        assert_eq!(l.assignments[0].demand_units_daily, 500.0);
    }

    #[rstest]
    #[case(300.0, 0.0)]
    #[case(0.0, 85.0)]
    #[case(-5.0, 85.0)]
    fn test_allocate_to_line_invalid_rates(#[case] cycle_time: f64, #[case] efficiency: f64) {
        let mut l = line("L1", 28_800.0);
        let compat = Compatibility::new("L1", "A", cycle_time, efficiency, 1);

        assert_eq!(allocate_to_line(&mut l, &compat, "Model A", 10.0), 0.0);
        assert!(l.assignments.is_empty());
        assert_eq!(l.time_used_daily, 0.0);
    }

    #[test]
    fn test_allocate_to_full_line_records_nothing() {
        let mut l = line("L1", 0.0);
        let compat = Compatibility::new("L1", "A", 300.0, 85.0, 1);
        assert_eq!(allocate_to_line(&mut l, &compat, "Model A", 10.0), 0.0);
        assert!(l.assignments.is_empty());
    }

    #[test]
    fn test_priority_tiers_before_model_order() {
        let compats = vec![
            Compatibility::new("L1", "A", 300.0, 85.0, 1),
            Compatibility::new("L1", "C", 300.0, 85.0, 1),
            Compatibility::new("L2", "B", 300.0, 85.0, 1),
            Compatibility::new("L2", "C", 300.0, 85.0, 2),
        ];
        let refs: Vec<&Compatibility> = compats.iter().collect();
        let config = PlannerConfig::default();

        let result = AllocationEngine::new(&config).allocate(
            "SMT",
            vec![line("L1", 28_800.0), line("L2", 28_800.0)],
            &refs,
            &demand(&[("A", 40.0), ("B", 60.0), ("C", 48.0)]),
        );

        let l1 = &result.lines[0];
        assert_eq!(l1.assignments.len(), 2);
        assert_eq!(l1.assignments[0].model_id, "A");
        assert_eq!(l1.assignments[1].model_id, "C");
        assert!((l1.assignments[1].allocated_units_daily - 41.6).abs() < 1e-9);
        assert_eq!(l1.utilization_percent(), 100.0);

        let l2 = &result.lines[1];
        assert_eq!(l2.assignments[0].model_id, "B");
        assert_eq!(l2.assignments[1].model_id, "C");
        assert_eq!(l2.assignments[1].priority, 2);
        assert!((l2.assignments[1].allocated_units_daily - 6.4).abs() < 1e-6);

        assert!(result.remaining.unfulfilled().is_empty());
        assert!((result.allocated_units("C") - 48.0).abs() < 1e-6);
    }

    #[test]
    fn test_models_without_demand_are_not_seeded() {
        let compats = vec![
            Compatibility::new("L1", "A", 60.0, 100.0, 1),
            Compatibility::new("L1", "Z", 60.0, 100.0, 1),
        ];
        let refs: Vec<&Compatibility> = compats.iter().collect();
        let config = PlannerConfig::default();

        let result = AllocationEngine::new(&config).allocate(
            "SMT",
            vec![line("L1", 28_800.0)],
            &refs,
            &demand(&[("A", 10.0), ("Q", 5.0)]),
        );

        assert!(result.remaining.contains("A"));
        assert!(!result.remaining.contains("Z"));
        assert!(!result.remaining.contains("Q"));
        assert_eq!(result.eligible.len(), 1);
    }

    #[test]
    fn test_insufficient_capacity_leaves_unfulfilled() {
        let compats = vec![Compatibility::new("L1", "A", 360.0, 100.0, 1)];
        let refs: Vec<&Compatibility> = compats.iter().collect();
        let config = PlannerConfig::default();

        let result = AllocationEngine::new(&config).allocate(
            "SMT",
            vec![line("L1", 28_800.0)],
            &refs,
            &demand(&[("A", 100.0)]),
        );

        assert_eq!(result.lines[0].utilization_percent(), 100.0);
        let unfulfilled = result.remaining.unfulfilled();
        assert_eq!(unfulfilled.len(), 1);
        assert!((unfulfilled[0].1 - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_compatibility_index_orders_by_line_then_priority() {
        let compats = vec![
            Compatibility::new("L2", "B", 60.0, 100.0, 1),
            Compatibility::new("L1", "A", 60.0, 100.0, 3),
            Compatibility::new("L1", "B", 60.0, 100.0, 1),
            Compatibility::new("L1", "C", 60.0, 100.0, 3),
            Compatibility::new("LX", "C", 60.0, 100.0, 3),
        ];
        let index = CompatibilityIndex::new(&compats);

        let ordered = index.for_lines(&[line("L1", 1.0), line("L2", 1.0)]);
        let keys: Vec<(&str, &str)> = ordered
            .iter()
            .map(|c| (c.line_id.as_str(), c.model_id.as_str()))
            .collect();
        assert_eq!(keys, vec![("L1", "B"), ("L1", "A"), ("L1", "C"), ("L2", "B")]);

        assert_eq!(index.unknown_lines(["L1", "L2"]), vec!["LX"]);
        assert!(index.for_line("nope").is_empty());
    }

    proptest! {
        #[test]
        fn prop_allocation_never_exceeds_capacity_or_demand(
            capacities in prop::collection::vec(0.0f64..50_000.0, 1..4),
            demands in prop::collection::vec(0.0f64..300.0, 1..5),
            cycle in 10.0f64..600.0,
            efficiency in 1.0f64..120.0,
        ) {
            let lines: Vec<ProductionLine> = capacities
                .iter()
                .enumerate()
                .map(|(i, c)| line(&format!("L{i}"), *c))
                .collect();
            let model_ids: Vec<String> = (0..demands.len()).map(|i| format!("M{i}")).collect();

            let mut compats = Vec::new();
            for (li, l) in lines.iter().enumerate() {
                for (mi, m) in model_ids.iter().enumerate() {
                    compats.push(Compatibility::new(&l.id, m, cycle, efficiency, ((li + mi) % 3) as u32 + 1));
                }
            }
            let index = CompatibilityIndex::new(&compats);
            let ordered = index.for_lines(&lines);

            let entries: Vec<(&str, f64)> = model_ids
                .iter()
                .map(String::as_str)
                .zip(demands.iter().copied())
                .collect();
            let table = demand(&entries);
            let config = PlannerConfig::default();

            let result = AllocationEngine::new(&config).allocate("SMT", lines, &ordered, &table);

            for l in &result.lines {
                prop_assert!(l.time_used_daily <= l.time_available_daily + 1e-6);
                for a in &l.assignments {
                    prop_assert!(a.allocated_units_daily > 0.0);
                    prop_assert!(a.allocated_units_daily <= a.demand_units_daily + 1e-9);
                }
            }
            for m in &model_ids {
                let total_demand = table.daily_demand(m).unwrap_or(0.0);
                prop_assert!(result.allocated_units(m) <= total_demand + 1e-6);
                prop_assert!(result.remaining.get(m) >= 0.0);
            }
        }
    }
}
