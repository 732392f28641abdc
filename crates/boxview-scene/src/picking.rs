use crate::box_mesh::Face;

/// 「何もヒットしていない」ことを表すオブジェクトidの番兵値
pub const INVALID_OBJECT_ID: u32 = u32::MAX;

/// 受理されたピック結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub object_id: u32,
    pub face: Face,
    /// レイパラメータt。[0,1]で小さいほど視点に近い
    pub dist: f32,
}

/// 最近傍ヒットを集約するアキュムレータ
///
/// 距離の尺度はレイパラメータt（小さいほど視点に近い）で統一する。
/// 初期距離は有効域[0,1]の外の2.0なので、最初の本物のヒットが必ず
/// 採用される。置き換えは厳密に近い場合のみ行うため、距離が完全に
/// 一致した候補同士は先に登録された方が勝つ。
#[derive(Debug, Clone, Copy)]
pub struct PickResult {
    dist: f32,
    object_id: u32,
    face: Face,
}

impl PickResult {
    /// 「ヒットなし」状態のアキュムレータを作成
    pub fn new() -> Self {
        Self {
            dist: 2.0,
            object_id: INVALID_OBJECT_ID,
            face: Face::Front,
        }
    }

    /// 候補を検討し、保持中より厳密に近ければ置き換える
    pub fn consider(&mut self, dist: f32, object_id: u32, face: Face) {
        if dist < self.dist {
            self.dist = dist;
            self.object_id = object_id;
            self.face = face;
        }
    }

    /// 候補を受理済みか
    pub fn has_hit(&self) -> bool {
        self.object_id != INVALID_OBJECT_ID
    }

    /// 受理済みのヒットがあれば取り出す
    pub fn hit(&self) -> Option<PickHit> {
        if !self.has_hit() {
            return None;
        }
        Some(PickHit {
            object_id: self.object_id,
            face: self.face,
            dist: self.dist,
        })
    }
}

impl Default for PickResult {
    fn default() -> Self {
        Self::new()
    }
}
