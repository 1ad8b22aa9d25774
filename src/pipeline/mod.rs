pub mod stage1_pathways;
pub mod stage2_filter;
pub mod stage3_scores;
pub mod stage4_report;
