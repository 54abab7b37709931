//! Scene export: a self-contained three.js HTML player and a JSON snapshot.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};
use sweep_core::Result;
use sweep_math::Point3;
use sweep_mesh::box_mesh;

use crate::animation::Recording;
use crate::camera::Camera;
use crate::scene::{ObjectKey, Scene, SceneGeometry, SceneObject};
use crate::viewer::ViewerConfig;

/// Everything the HTML player needs, as one JSON value.
///
/// Objects are listed in scene order; tracks refer to them by index.
pub fn scene_payload(
    scene: &Scene,
    camera: &Camera,
    recording: &Recording,
    config: &ViewerConfig,
) -> Value {
    let mut index: HashMap<ObjectKey, usize> = HashMap::new();
    let mut objects = Vec::with_capacity(scene.len());
    for (key, object) in scene.iter() {
        index.insert(key, objects.len());
        objects.push(object_payload(object));
    }

    let tracks: Vec<Value> = recording
        .tracks
        .iter()
        .filter_map(|track| {
            let &object = index.get(&track.object)?;
            let times: Vec<u64> = track.keyframes.iter().map(|k| k.time_ms).collect();
            let matrices: Vec<[f32; 16]> = track.keyframes.iter().map(|k| k.matrix).collect();
            Some(json!({ "object": object, "times": times, "matrices": matrices }))
        })
        .collect();

    json!({
        "title": config.title,
        "background": config.background,
        "loop": config.looping,
        "duration": recording.duration_ms,
        "camera": {
            "position": xyz(camera.position),
            "target": xyz(camera.target),
            "up": xyz(camera.up),
            "fov": camera.fov_y.to_degrees(),
            "near": camera.near,
            "far": camera.far,
        },
        "objects": objects,
        "tracks": tracks,
    })
}

fn object_payload(object: &SceneObject) -> Value {
    let matrix = object.pose().unwrap_or_default().to_f32_array();
    let base = json!({
        "name": object.name,
        "color": object.color,
        "matrix": matrix,
    });
    let specific = match &object.geometry {
        SceneGeometry::Curve { points } => json!({
            "kind": "curve",
            "points": flatten(points),
            "showPoints": false,
        }),
        SceneGeometry::Polyline {
            points,
            show_points,
        } => json!({
            "kind": "polyline",
            "points": flatten(points),
            "showPoints": show_points,
        }),
        SceneGeometry::Frame { size, .. } => json!({
            "kind": "frame",
            "size": size,
        }),
        SceneGeometry::Box { shape } => {
            let mesh = box_mesh(shape);
            json!({
                "kind": "box",
                "positions": mesh.position_buffer(),
                "normals": mesh.normal_buffer(),
                "indices": mesh.indices,
            })
        }
    };
    merge(base, specific)
}

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(dst), Value::Object(src)) = (base.as_object_mut(), extra) {
        dst.extend(src);
    }
    base
}

fn xyz(p: Point3) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn flatten(points: &[Point3]) -> Vec<f32> {
    points
        .iter()
        .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
        .collect()
}

/// Write the scene and its recorded animation as a standalone HTML page.
pub fn export_html(
    scene: &Scene,
    camera: &Camera,
    recording: &Recording,
    config: &ViewerConfig,
    path: &Path,
) -> Result<()> {
    let payload = serde_json::to_string(&scene_payload(scene, camera, recording, config))?;
    // Keep the payload from closing its own <script> element.
    let payload = payload.replace("</", "<\\/");

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    file.write_all(HTML_HEAD.as_bytes())?;
    writeln!(file, "        const sceneData = {payload};")?;
    file.write_all(HTML_PLAYER.as_bytes())?;
    file.flush()?;

    log::info!(
        "exported {} objects, {} keyframes to {}",
        scene.len(),
        recording.keyframe_count(),
        path.display()
    );
    Ok(())
}

#[derive(Serialize)]
struct SnapshotObject<'a> {
    key: ObjectKey,
    #[serde(flatten)]
    object: &'a SceneObject,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    camera: &'a Camera,
    objects: Vec<SnapshotObject<'a>>,
    recording: &'a Recording,
}

/// Write the scene, camera and recording as pretty-printed JSON.
pub fn export_snapshot(scene: &Scene, camera: &Camera, recording: &Recording, path: &Path) -> Result<()> {
    let snapshot = Snapshot {
        camera,
        objects: scene
            .iter()
            .map(|(key, object)| SnapshotObject { key, object })
            .collect(),
        recording,
    };
    let file = std::io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(file, &snapshot)?;
    log::info!("wrote scene snapshot to {}", path.display());
    Ok(())
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sweep Viewer</title>
    <style>
        body {
            margin: 0;
            overflow: hidden;
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: #1a1a1a;
        }
        #container {
            width: 100vw;
            height: 100vh;
        }
        #info {
            position: absolute;
            top: 10px;
            left: 10px;
            background: rgba(0, 0, 0, 0.7);
            color: white;
            padding: 10px 15px;
            border-radius: 5px;
            font-size: 13px;
        }
        #info h3 {
            margin: 0 0 6px 0;
            font-size: 15px;
        }
        #error {
            position: absolute;
            top: 50%;
            left: 50%;
            transform: translate(-50%, -50%);
            background: rgba(200, 0, 0, 0.9);
            color: white;
            padding: 20px;
            border-radius: 5px;
            display: none;
        }
    </style>
</head>
<body>
    <div id="container"></div>
    <div id="info">
        <h3 id="title"></h3>
        <div id="stats"></div>
        <div id="clock"></div>
    </div>
    <div id="error">Failed to load three.js from CDN. Please check your internet connection.</div>

    <script src="https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js"></script>
    <script>
        if (typeof THREE === 'undefined') document.getElementById('error').style.display = 'block';
"#;

const HTML_PLAYER: &str = r#"
        function rgb(c) {
            return new THREE.Color(c[0], c[1], c[2]);
        }

        function placed(object3d, matrix) {
            object3d.matrixAutoUpdate = false;
            object3d.matrix.fromArray(matrix);
            return object3d;
        }

        function buildObject(data) {
            const geometry = new THREE.BufferGeometry();
            switch (data.kind) {
                case 'curve':
                case 'polyline': {
                    geometry.setAttribute('position', new THREE.Float32BufferAttribute(data.points, 3));
                    const group = new THREE.Group();
                    group.add(new THREE.Line(geometry, new THREE.LineBasicMaterial({ color: rgb(data.color) })));
                    if (data.showPoints) {
                        group.add(new THREE.Points(geometry, new THREE.PointsMaterial({
                            color: rgb(data.color), size: 6, sizeAttenuation: false
                        })));
                    }
                    return group;
                }
                case 'frame': {
                    const s = data.size;
                    geometry.setAttribute('position', new THREE.Float32BufferAttribute(
                        [0, 0, 0, s, 0, 0, 0, 0, 0, 0, s, 0, 0, 0, 0, 0, 0, s], 3));
                    geometry.setAttribute('color', new THREE.Float32BufferAttribute(
                        [1, 0, 0, 1, 0, 0, 0, 0.8, 0, 0, 0.8, 0, 0, 0, 1, 0, 0, 1], 3));
                    const axes = new THREE.LineSegments(geometry, new THREE.LineBasicMaterial({ vertexColors: true }));
                    return placed(axes, data.matrix);
                }
                case 'box': {
                    geometry.setAttribute('position', new THREE.Float32BufferAttribute(data.positions, 3));
                    geometry.setAttribute('normal', new THREE.Float32BufferAttribute(data.normals, 3));
                    geometry.setIndex(data.indices);
                    const group = new THREE.Group();
                    group.add(new THREE.Mesh(geometry, new THREE.MeshPhongMaterial({
                        color: rgb(data.color), shininess: 30, side: THREE.DoubleSide
                    })));
                    group.add(new THREE.LineSegments(
                        new THREE.EdgesGeometry(geometry),
                        new THREE.LineBasicMaterial({ color: 0x222222 })));
                    return placed(group, data.matrix);
                }
            }
            return new THREE.Group();
        }

        function poseAt(track, time) {
            let i = 0;
            while (i + 1 < track.times.length && track.times[i + 1] <= time) i++;
            return track.matrices[i];
        }

        function initScene() {
            document.title = sceneData.title;
            document.getElementById('title').textContent = sceneData.title;
            document.getElementById('stats').textContent =
                sceneData.objects.length + ' objects, ' + sceneData.tracks.length + ' animated';

            THREE.Object3D.DefaultUp.set(0, 0, 1);

            const scene = new THREE.Scene();
            scene.background = rgb(sceneData.background);

            const cam = sceneData.camera;
            const camera = new THREE.PerspectiveCamera(cam.fov, window.innerWidth / window.innerHeight, cam.near, cam.far);
            camera.up.set(cam.up[0], cam.up[1], cam.up[2]);
            camera.position.set(cam.position[0], cam.position[1], cam.position[2]);
            const target = new THREE.Vector3(cam.target[0], cam.target[1], cam.target[2]);
            camera.lookAt(target);

            const renderer = new THREE.WebGLRenderer({ antialias: true });
            renderer.setPixelRatio(window.devicePixelRatio);
            renderer.setSize(window.innerWidth, window.innerHeight);
            document.getElementById('container').appendChild(renderer.domElement);

            scene.add(new THREE.AmbientLight(0x404040, 2));
            const dirLight1 = new THREE.DirectionalLight(0xffffff, 1);
            dirLight1.position.set(1, 1, 1);
            scene.add(dirLight1);
            const dirLight2 = new THREE.DirectionalLight(0xffffff, 0.5);
            dirLight2.position.set(-1, -1, -1);
            scene.add(dirLight2);

            const grid = new THREE.GridHelper(20, 20, 0x555555, 0x333333);
            grid.rotation.x = Math.PI / 2;
            scene.add(grid);

            const built = sceneData.objects.map(buildObject);
            built.forEach(obj => scene.add(obj));

            // Orbit controls (mouse drag), spherical around the target with +Z up
            const offset = new THREE.Vector3().subVectors(camera.position, target);
            let radius = offset.length();
            let theta = Math.atan2(offset.y, offset.x);
            let phi = Math.acos(offset.z / radius);
            let isDragging = false;
            let previousMousePosition = { x: 0, y: 0 };

            function updateCameraPosition() {
                camera.position.set(
                    target.x + radius * Math.sin(phi) * Math.cos(theta),
                    target.y + radius * Math.sin(phi) * Math.sin(theta),
                    target.z + radius * Math.cos(phi)
                );
                camera.lookAt(target);
            }

            renderer.domElement.addEventListener('mousedown', (e) => {
                isDragging = true;
                previousMousePosition = { x: e.clientX, y: e.clientY };
            });

            renderer.domElement.addEventListener('mousemove', (e) => {
                if (isDragging) {
                    theta -= (e.clientX - previousMousePosition.x) * 0.01;
                    phi = Math.max(0.05, Math.min(Math.PI - 0.05, phi - (e.clientY - previousMousePosition.y) * 0.01));
                    previousMousePosition = { x: e.clientX, y: e.clientY };
                    updateCameraPosition();
                }
            });

            renderer.domElement.addEventListener('mouseup', () => {
                isDragging = false;
            });

            renderer.domElement.addEventListener('wheel', (e) => {
                e.preventDefault();
                radius = Math.max(0.5, radius * (1 + e.deltaY * 0.001));
                updateCameraPosition();
            });

            window.addEventListener('resize', () => {
                camera.aspect = window.innerWidth / window.innerHeight;
                camera.updateProjectionMatrix();
                renderer.setSize(window.innerWidth, window.innerHeight);
            });

            // Keyframe playback
            const start = performance.now();
            const clock = document.getElementById('clock');
            function animate() {
                requestAnimationFrame(animate);
                const elapsed = performance.now() - start;
                const duration = sceneData.duration;
                let time = duration;
                if (duration > 0 && sceneData.loop) {
                    time = elapsed % duration;
                } else if (elapsed < duration) {
                    time = elapsed;
                }
                sceneData.tracks.forEach(track => {
                    built[track.object].matrix.fromArray(poseAt(track, time));
                });
                clock.textContent = (time / 1000).toFixed(1) + ' s / ' + (duration / 1000).toFixed(1) + ' s';
                renderer.render(scene, camera);
            }
            animate();
        }

        if (typeof THREE !== 'undefined') initScene();
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use sweep_geometry::{BoxShape, Line, Polyline};
    use sweep_math::{DVec3, Frame, Transformation};

    fn sample_scene() -> (Scene, ObjectKey) {
        let mut scene = Scene::new();
        scene.add_curve(&Line::new(DVec3::ZERO, DVec3::X), 0.01);
        scene.add_polyline(&Polyline::new(vec![DVec3::ZERO, DVec3::Y, DVec3::Z]), true);
        scene.add_frame(&Frame::world_xy(), 0.5);
        let key = scene.add_box(BoxShape::new(0.8, 0.5, 0.3).unwrap());
        (scene, key)
    }

    #[test]
    fn test_payload_indexes_tracks_by_object_order() {
        let (scene, key) = sample_scene();
        let mut recording = Recording::default();
        recording.record(key, Duration::ZERO, &Transformation::identity());
        recording.record(key, Duration::from_millis(100), &Transformation::from_translation(DVec3::X));
        recording.duration_ms = 200;

        let payload = scene_payload(&scene, &Camera::default(), &recording, &ViewerConfig::default());
        let objects = payload["objects"].as_array().unwrap();
        assert_eq!(objects.len(), 4);
        assert_eq!(objects[1]["kind"], "polyline");
        assert_eq!(objects[1]["showPoints"], true);
        assert_eq!(objects[3]["kind"], "box");
        assert_eq!(objects[3]["indices"].as_array().unwrap().len(), 36);

        let tracks = payload["tracks"].as_array().unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0]["object"], 3);
        assert_eq!(tracks[0]["times"], json!([0, 100]));
        assert_eq!(payload["duration"], 200);
    }

    #[test]
    fn test_html_export() {
        let (scene, _) = sample_scene();
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("scene.html");

        export_html(&scene, &Camera::default(), &Recording::default(), &ViewerConfig::default(), &html_path)
            .unwrap();

        let content = std::fs::read_to_string(&html_path).unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
        assert!(content.contains("three.min.js"));
        assert!(content.contains("const sceneData = {"));
        assert!(content.contains("Box.003"));
        assert!(content.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_payload_cannot_close_script_tag() {
        let (scene, _) = sample_scene();
        let config = ViewerConfig {
            title: "</script><b>".into(),
            ..ViewerConfig::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("scene.html");
        export_html(&scene, &Camera::default(), &Recording::default(), &config, &html_path).unwrap();

        let content = std::fs::read_to_string(&html_path).unwrap();
        assert_eq!(content.matches("</script>").count(), 2);
    }

    #[test]
    fn test_snapshot_is_valid_json() {
        let (scene, key) = sample_scene();
        let mut recording = Recording::default();
        recording.record(key, Duration::ZERO, &Transformation::identity());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        export_snapshot(&scene, &Camera::default(), &recording, &path).unwrap();

        let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let objects = parsed["objects"].as_array().unwrap();
        assert_eq!(objects.len(), 4);
        assert_eq!(objects[0]["geometry"]["kind"], "curve");
        assert_eq!(objects[3]["geometry"]["shape"]["xsize"], 0.8);
        assert_eq!(parsed["recording"]["tracks"].as_array().unwrap().len(), 1);
    }
}
