//! 保存済みキーワードの絞り込み条件

use crate::domain::keyword::{CompetitionLevel, Difficulty, KeywordRecord, SearchVolume};

/// 3 軸の独立した絞り込み条件
///
/// 各軸は「制約なし（None）」か「宣言された値への完全一致」のどちらか。
/// 組み合わせは 3 軸の論理 AND。セッション内でのみ生きる一時状態で、永続化しない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    pub difficulty: Option<Difficulty>,
    pub search_volume: Option<SearchVolume>,
    pub competition_level: Option<CompetitionLevel>,
}

impl KeywordFilter {
    /// 全軸とも制約なしか
    pub fn is_unconstrained(&self) -> bool {
        self.difficulty.is_none()
            && self.search_volume.is_none()
            && self.competition_level.is_none()
    }

    /// レコードが全軸の条件を満たすか（AND）
    pub fn matches(&self, record: &KeywordRecord) -> bool {
        if let Some(d) = self.difficulty {
            if record.difficulty != d {
                return false;
            }
        }
        if let Some(v) = self.search_volume {
            if record.search_volume != v {
                return false;
            }
        }
        if let Some(c) = self.competition_level {
            if record.competition_level != c {
                return false;
            }
        }
        true
    }

    /// 部分的な条件をマージする（Some の軸だけ上書き）
    pub fn merge(&mut self, partial: KeywordFilter) {
        if partial.difficulty.is_some() {
            self.difficulty = partial.difficulty;
        }
        if partial.search_volume.is_some() {
            self.search_volume = partial.search_volume;
        }
        if partial.competition_level.is_some() {
            self.competition_level = partial.competition_level;
        }
    }

    /// 全軸を制約なしに戻す
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
