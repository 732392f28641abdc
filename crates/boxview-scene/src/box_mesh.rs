use glam::{Mat4, Vec3};

use crate::patch::Patch;
use crate::ray::PickRay;

/// ボックスの面。インデックスはfront=0からtop=5の固定順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Right,
    Back,
    Left,
    Bottom,
    Top,
}

impl Face {
    /// 全6面を固定順で並べた配列
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Right,
        Face::Back,
        Face::Left,
        Face::Bottom,
        Face::Top,
    ];

    /// 面インデックスを取得
    #[inline]
    pub fn index(self) -> u32 {
        match self {
            Face::Front => 0,
            Face::Right => 1,
            Face::Back => 2,
            Face::Left => 3,
            Face::Bottom => 4,
            Face::Top => 5,
        }
    }

    /// インデックスから面を復元
    pub fn from_index(index: u32) -> Option<Face> {
        Face::ALL.get(index as usize).copied()
    }
}

/// 各面のパッチを組み立てる角の割り当てテーブル
/// (起点, 隣接1, 隣接2)。外側から見てCCWになる組で、法線は外向き
const FACE_CORNERS: [[usize; 3]; 6] = [
    [0, 1, 3], // front
    [1, 5, 2], // right
    [5, 4, 6], // back
    [4, 0, 7], // left
    [4, 5, 0], // bottom
    [3, 2, 7], // top
];

/// 選択された面の強調色 (#b40808)
const HIGHLIGHT_COLOR: [f32; 3] = [0.706, 0.031, 0.031];
/// 選択ボックスの非選択面の色 (#f3f3f3)
const DIMMED_COLOR: [f32; 3] = [0.953, 0.953, 0.953];
/// 新規ボックスのデフォルト色
const DEFAULT_COLOR: [f32; 3] = [0.0, 0.0, 1.0];

/// ピック対象のボックス
///
/// 原点中心のw x h x dの直方体として生成され、transform()でワールド内に
/// 配置する。8つの角とそこから組み立てた6枚の面パッチを保持し、パッチは
/// 角が動くたびに内部で再計算されるため古い面情報が残ることはない。
#[derive(Debug, Clone)]
pub struct BoxMesh {
    corners: [Vec3; 8],
    faces: [Patch; 6],
    colors: [[f32; 3]; 6],
}

impl BoxMesh {
    /// 原点中心の直方体を作成（幅 x 高さ x 奥行き）
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let hw = 0.5 * width;
        let hh = 0.5 * height;
        let hd = 0.5 * depth;
        let corners = [
            Vec3::new(-hw, -hh, hd),  // a = 0
            Vec3::new(hw, -hh, hd),   // b = 1
            Vec3::new(hw, hh, hd),    // c = 2
            Vec3::new(-hw, hh, hd),   // d = 3
            Vec3::new(-hw, -hh, -hd), // e = 4
            Vec3::new(hw, -hh, -hd),  // f = 5
            Vec3::new(hw, hh, -hd),   // g = 6
            Vec3::new(-hw, hh, -hd),  // h = 7
        ];
        Self {
            corners,
            faces: build_faces(&corners),
            colors: [DEFAULT_COLOR; 6],
        }
    }

    /// 外部のメッシュ生成器が出力した8つの角からボックスを作成
    ///
    /// 角の並びは`new`と同じ（手前下左から反時計回り、次に奥の4角）。
    pub fn from_corners(corners: [Vec3; 8]) -> Self {
        Self {
            corners,
            faces: build_faces(&corners),
            colors: [DEFAULT_COLOR; 6],
        }
    }

    /// 変換を適用する（破壊的操作、繰り返すと精度が落ちる点に注意）
    /// 面パッチも同時に再計算される
    pub fn transform(&mut self, m: Mat4) {
        for corner in &mut self.corners {
            *corner = m.transform_point3(*corner);
        }
        self.faces = build_faces(&self.corners);
    }

    /// 変換済みの8つの角
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// 面のパッチを取得
    pub fn face_patch(&self, face: Face) -> &Patch {
        &self.faces[face.index() as usize]
    }

    /// 面とレイの交差判定。受理時はレイパラメータt
    pub fn intersect_face(&self, face: Face, ray: &PickRay) -> Option<f32> {
        self.faces[face.index() as usize].intersect(ray)
    }

    /// 全面を単色にする
    pub fn set_color(&mut self, color: [f32; 3]) {
        self.colors = [color; 6];
    }

    /// 6面の色を個別に設定（front, right, back, left, bottom, top順）
    pub fn set_face_colors(&mut self, colors: [[f32; 3]; 6]) {
        self.colors = colors;
    }

    /// 面の色を取得
    pub fn face_color(&self, face: Face) -> [f32; 3] {
        self.colors[face.index() as usize]
    }

    /// 選択された面を強調色、残りの面を無彩色にする
    pub fn highlight_face(&mut self, face: Face) {
        for f in Face::ALL {
            self.colors[f.index() as usize] = if f == face {
                HIGHLIGHT_COLOR
            } else {
                DIMMED_COLOR
            };
        }
    }
}

fn build_faces(corners: &[Vec3; 8]) -> [Patch; 6] {
    FACE_CORNERS.map(|[a, b, d]| Patch::from_corners(corners[a], corners[b], corners[d]))
}
