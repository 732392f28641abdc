use boxview_core::Name;

use crate::box_mesh::{BoxMesh, Face};
use crate::picking::{PickHit, PickResult};
use crate::ray::PickRay;

/// シーン内の1ボックス（名前つき）
#[derive(Debug, Clone)]
pub struct SceneBox {
    name: Name,
    mesh: BoxMesh,
}

impl SceneBox {
    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn mesh(&self) -> &BoxMesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut BoxMesh {
        &mut self.mesh
    }
}

/// ピック対象となるボックスの入れ物
///
/// idは追加順の連番。このシステムではボックスを個別に削除しないため
/// idは安定で、そのままピック結果のobject_idになる。
#[derive(Debug, Clone, Default)]
pub struct Scene {
    boxes: Vec<SceneBox>,
}

impl Scene {
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// ボックスを追加してidを返す
    pub fn add_box(&mut self, name: impl Into<String>, mesh: BoxMesh) -> u32 {
        let id = self.boxes.len() as u32;
        self.boxes.push(SceneBox {
            name: Name::new(name),
            mesh,
        });
        id
    }

    pub fn get(&self, id: u32) -> Option<&SceneBox> {
        self.boxes.get(id as usize)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut SceneBox> {
        self.boxes.get_mut(id as usize)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// (id, ボックス)のイテレータ
    pub fn iter(&self) -> impl Iterator<Item = (u32, &SceneBox)> {
        self.boxes.iter().enumerate().map(|(i, b)| (i as u32, b))
    }

    /// レイに最も近いヒットを探す
    ///
    /// 全ボックス×全6面を走査してアキュムレータに集約する。走査順は
    /// 最近傍の結果を変えない（tが完全一致のときだけ先勝ち）。
    pub fn pick(&self, ray: &PickRay) -> Option<PickHit> {
        let mut result = PickResult::new();
        for (id, scene_box) in self.iter() {
            for face in Face::ALL {
                if let Some(t) = scene_box.mesh().intersect_face(face, ray) {
                    result.consider(t, id, face);
                }
            }
        }
        result.hit()
    }

    /// ヒットした面を強調表示色に塗り替える
    pub fn highlight(&mut self, hit: &PickHit) {
        if let Some(scene_box) = self.get_mut(hit.object_id) {
            scene_box.mesh_mut().highlight_face(hit.face);
        }
    }
}
